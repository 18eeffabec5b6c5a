//! Round scheduling.
//!
//! # States
//! - Waiting: idle until the next tick or the stop signal
//! - Stopped: terminal
//!
//! # Design Decisions
//! - First round fires immediately, then the timer is rearmed after each round
//! - A slow round delays the next tick; rounds never overlap
//! - Stop is only observed between rounds, never during one
//! - A failed report write is logged; only round errors are fatal

use std::io::{self, Write};
use std::time::Duration;

use crate::error::MonitorError;
use crate::health::probe::Probe;
use crate::health::round::{write_report, RoundRunner};
use crate::lifecycle::ShutdownSignal;

/// Drives a [`RoundRunner`] on a fixed interval until stopped.
pub struct Scheduler<P, W = io::Stdout> {
    runner: RoundRunner<P>,
    interval: Duration,
    out: W,
}

impl<P: Probe> Scheduler<P> {
    /// Scheduler reporting to standard output.
    pub fn new(runner: RoundRunner<P>, interval: Duration) -> Self {
        Self::with_output(runner, interval, io::stdout())
    }
}

impl<P: Probe, W: Write> Scheduler<P, W> {
    /// Scheduler reporting to an arbitrary writer.
    pub fn with_output(runner: RoundRunner<P>, interval: Duration, out: W) -> Self {
        Self {
            runner,
            interval,
            out,
        }
    }

    /// The wrapped round runner.
    pub fn runner(&self) -> &RoundRunner<P> {
        &self.runner
    }

    /// The report writer.
    pub fn output(&self) -> &W {
        &self.out
    }

    /// Run rounds until `shutdown` fires (`Ok`) or a round hits a fatal error.
    pub async fn run(&mut self, mut shutdown: ShutdownSignal) -> Result<(), MonitorError> {
        tracing::info!(
            interval_secs = self.interval.as_secs_f64(),
            endpoints = self.runner.endpoints().len(),
            hosts = self.runner.aggregator().host_count(),
            "Scheduler starting"
        );

        let mut delay = Duration::ZERO;

        loop {
            tokio::select! {
                biased;
                _ = shutdown.recv() => {
                    tracing::info!(rounds = self.runner.rounds(), "Scheduler received stop signal, exiting");
                    return Ok(());
                }
                _ = tokio::time::sleep(delay) => {}
            }

            let reports = self.runner.run_round().await.map_err(|e| {
                tracing::error!(error = %e, "Round aborted");
                e
            })?;
            if let Err(e) = write_report(&mut self.out, &reports) {
                tracing::warn!(error = %e, "Failed to write availability report");
            }

            delay = self.interval;
        }
    }

    /// Consume the scheduler, returning the runner and writer.
    pub fn into_parts(self) -> (RoundRunner<P>, W) {
        (self.runner, self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EndpointConfig;
    use crate::health::aggregator::HostAggregator;
    use crate::health::round::tests::ScriptedProber;
    use crate::health::probe::ProbeError;
    use crate::lifecycle::Shutdown;
    use reqwest::StatusCode;

    /// Writer whose every write fails, like stdout on a closed pipe.
    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    /// Answers 200 after a fixed delay per endpoint.
    struct SlowProber {
        delay: Duration,
    }

    impl Probe for SlowProber {
        async fn probe(&self, _: &EndpointConfig) -> Result<StatusCode, ProbeError> {
            tokio::time::sleep(self.delay).await;
            Ok(StatusCode::OK)
        }
    }

    fn runner(urls: &[(&str, u16)]) -> RoundRunner<ScriptedProber> {
        let eps = urls
            .iter()
            .map(|(url, _)| EndpointConfig::get(*url, *url))
            .collect();
        RoundRunner::new(eps, ScriptedProber::new(urls)).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_rounds_repeat_on_interval() {
        let shutdown = Shutdown::new();
        let signal = shutdown.subscribe();
        let mut scheduler = Scheduler::with_output(
            runner(&[("http://a.com/", 200)]),
            Duration::from_secs(3),
            Vec::new(),
        );

        let handle = tokio::spawn(async move {
            let result = scheduler.run(signal).await;
            (result, scheduler)
        });

        // Rounds at t=0, 3 and 6.
        tokio::time::sleep(Duration::from_millis(6500)).await;
        shutdown.trigger();

        let (result, scheduler) = handle.await.unwrap();
        assert!(result.is_ok());
        assert_eq!(scheduler.runner().rounds(), 3);

        let output = String::from_utf8(scheduler.output().clone()).unwrap();
        assert_eq!(output.lines().count(), 3);
        assert!(output.lines().all(|l| l == "a.com has 100% availability percentage."));
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_round_is_immediate() {
        let shutdown = Shutdown::new();
        let signal = shutdown.subscribe();
        let mut scheduler = Scheduler::with_output(
            runner(&[("http://a.com/", 503)]),
            Duration::from_secs(3),
            Vec::new(),
        );

        let handle = tokio::spawn(async move {
            let result = scheduler.run(signal).await;
            (result, scheduler)
        });

        tokio::time::sleep(Duration::from_millis(10)).await;
        shutdown.trigger();

        let (result, scheduler) = handle.await.unwrap();
        assert!(result.is_ok());
        assert_eq!(scheduler.runner().rounds(), 1);
        assert_eq!(
            String::from_utf8(scheduler.output().clone()).unwrap(),
            "a.com has 0% availability percentage.\n"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_before_start_runs_no_round() {
        let shutdown = Shutdown::new();
        let signal = shutdown.subscribe();
        shutdown.trigger();

        let mut scheduler = Scheduler::with_output(
            runner(&[("http://a.com/", 200)]),
            Duration::from_secs(3),
            Vec::new(),
        );

        assert!(scheduler.run(signal).await.is_ok());
        assert_eq!(scheduler.runner().rounds(), 0);
        assert!(scheduler.output().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_shutdown_stops() {
        let shutdown = Shutdown::new();
        let signal = shutdown.subscribe();
        drop(shutdown);

        let mut scheduler = Scheduler::with_output(
            runner(&[("http://a.com/", 200)]),
            Duration::from_secs(3),
            Vec::new(),
        );

        assert!(scheduler.run(signal).await.is_ok());
        assert_eq!(scheduler.runner().rounds(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fatal_round_stops_scheduler() {
        let shutdown = Shutdown::new();
        let aggregator = HostAggregator::build(&[EndpointConfig::get("a", "http://a.com/")]).unwrap();
        let probed = vec![EndpointConfig::get("b", "http://b.com/")];
        let runner = RoundRunner::from_parts(probed, aggregator, ScriptedProber::new(&[]));
        let mut scheduler = Scheduler::with_output(runner, Duration::from_secs(3), Vec::new());

        let err = scheduler.run(shutdown.subscribe()).await.unwrap_err();
        assert!(matches!(err, MonitorError::Invariant(_)));
        assert!(scheduler.output().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_report_write_failure_keeps_running() {
        let shutdown = Shutdown::new();
        let signal = shutdown.subscribe();
        let mut scheduler = Scheduler::with_output(
            runner(&[("http://a.com/", 200)]),
            Duration::from_secs(3),
            ClosedPipe,
        );

        let handle = tokio::spawn(async move {
            let result = scheduler.run(signal).await;
            (result, scheduler)
        });

        tokio::time::sleep(Duration::from_millis(6500)).await;
        shutdown.trigger();

        let (result, scheduler) = handle.await.unwrap();
        assert!(result.is_ok());
        assert_eq!(scheduler.runner().rounds(), 3);
        assert_eq!(scheduler.runner().aggregator().counter("a.com").unwrap().total(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_during_round_lets_round_finish() {
        let shutdown = Shutdown::new();
        let signal = shutdown.subscribe();
        let eps = vec![
            EndpointConfig::get("x", "http://a.com/x"),
            EndpointConfig::get("y", "http://a.com/y"),
        ];
        let runner = RoundRunner::new(
            eps,
            SlowProber {
                delay: Duration::from_secs(1),
            },
        )
        .unwrap();
        let mut scheduler = Scheduler::with_output(runner, Duration::from_secs(3), Vec::new());

        let handle = tokio::spawn(async move {
            let result = scheduler.run(signal).await;
            (result, scheduler)
        });

        // Mid-way through the second endpoint of the first round.
        tokio::time::sleep(Duration::from_millis(1500)).await;
        shutdown.trigger();

        let (result, scheduler) = handle.await.unwrap();
        assert!(result.is_ok());
        assert_eq!(scheduler.runner().rounds(), 1);
        assert_eq!(scheduler.runner().aggregator().counter("a.com").unwrap().total(), 2);
        assert_eq!(
            String::from_utf8(scheduler.output().clone()).unwrap(),
            "a.com has 100% availability percentage.\n"
        );
    }
}
