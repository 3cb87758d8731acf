#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
    use spent::libs::scheduler::{Cadence, Scheduler};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::sleep;

    const ONE_MINUTE: Duration = Duration::from_millis(60_000);

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_cadence_runs_when_it_has_never_run() {
        let cadence = Cadence::new(ONE_MINUTE);

        assert!(cadence.should_run(start()));
        assert!(cadence.last_run().is_none());
    }

    #[test]
    fn test_cadence_waits_for_a_full_interval() {
        let mut cadence = Cadence::new(ONE_MINUTE);
        cadence.mark_run(start());

        assert!(!cadence.should_run(start() + ChronoDuration::milliseconds(2_500)));
        assert!(!cadence.should_run(start() + ChronoDuration::milliseconds(59_999)));
        assert!(cadence.should_run(start() + ChronoDuration::milliseconds(60_000)));
    }

    #[test]
    fn test_cadence_recovers_from_a_suspended_host() {
        // the host sleeps through three whole intervals; the next tick
        // triggers exactly one catch-up run, not one per missed tick
        let mut cadence = Cadence::new(ONE_MINUTE);
        cadence.mark_run(start());

        let wakeup = start() + ChronoDuration::milliseconds(3 * 60_000 + 1_700);
        assert!(cadence.should_run(wakeup));
        cadence.mark_run(wakeup);

        let next_tick = wakeup + ChronoDuration::milliseconds(2_500);
        assert!(!cadence.should_run(next_tick));
    }

    #[test]
    fn test_cadence_ignores_a_clock_running_backwards() {
        let mut cadence = Cadence::new(ONE_MINUTE);
        cadence.mark_run(start());

        assert!(!cadence.should_run(start() - ChronoDuration::milliseconds(90_000)));
    }

    #[test]
    fn test_cadence_clear_forgets_the_last_run() {
        let mut cadence = Cadence::new(ONE_MINUTE);
        cadence.mark_run(start());
        cadence.clear();

        assert!(cadence.last_run().is_none());
        assert!(cadence.should_run(start() + ChronoDuration::milliseconds(1)));
    }

    #[tokio::test]
    async fn test_schedule_runs_the_task_once_per_interval() {
        let mut scheduler = Scheduler::new(Duration::from_millis(2_400));
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);

        scheduler.schedule(move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });
        assert!(scheduler.is_scheduled());
        assert!(scheduler.last_run().is_none());

        // ticks arrive every 100ms; the first one runs the task, the rest
        // wait for the interval to elapse
        sleep(Duration::from_millis(450)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert!(scheduler.last_run().is_some());
    }

    #[tokio::test]
    async fn test_unschedule_stops_runs_and_clears_last_run() {
        let mut scheduler = Scheduler::new(Duration::from_millis(2_400));
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);

        scheduler.schedule(move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });
        sleep(Duration::from_millis(350)).await;

        scheduler.unschedule();
        assert!(!scheduler.is_scheduled());
        assert!(scheduler.last_run().is_none());

        let after_stop = runs.load(Ordering::SeqCst);
        sleep(Duration::from_millis(400)).await;
        assert_eq!(runs.load(Ordering::SeqCst), after_stop);
    }

    #[tokio::test]
    async fn test_unschedule_when_idle_is_a_no_op() {
        let mut scheduler = Scheduler::new(ONE_MINUTE);
        scheduler.unschedule();

        assert!(!scheduler.is_scheduled());
    }

    #[tokio::test]
    async fn test_reschedule_replaces_the_previous_schedule() {
        let mut scheduler = Scheduler::new(Duration::from_millis(2_400));
        let first_runs = Arc::new(AtomicUsize::new(0));
        let second_runs = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&first_runs);
        scheduler.schedule(move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        let counter = Arc::clone(&second_runs);
        scheduler.schedule(move || {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        sleep(Duration::from_millis(450)).await;
        assert_eq!(first_runs.load(Ordering::SeqCst), 0);
        assert!(second_runs.load(Ordering::SeqCst) >= 1);
    }
}
