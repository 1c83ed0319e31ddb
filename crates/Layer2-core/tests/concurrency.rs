//! 멀티스레드 등록/제거/발행 통합 테스트
//!
//! `cargo test -p gridbus-core --test concurrency`

use gridbus_core::{
    DataProxy, Facade, Mediator, Notification, NotificationCode, Result, SimpleCommand,
};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

const THREADS: usize = 16;
const ITERATIONS: usize = 1_000;

const SHARED: NotificationCode = NotificationCode(1);
const SHARED_COMMAND: NotificationCode = NotificationCode(2);

/// 전달받은 알림 id 를 기록. 같은 id 가 두 번 오면 중복 전달
#[derive(Default)]
struct DeliveryLog {
    seen: Mutex<HashSet<u64>>,
    duplicates: AtomicUsize,
}

impl DeliveryLog {
    fn record(&self, notification: &Notification) {
        if let Some(id) = notification.body::<u64>() {
            if !self.seen.lock().insert(*id) {
                self.duplicates.fetch_add(1, Ordering::SeqCst);
            }
        }
    }
}

struct Worker {
    name: String,
    code: NotificationCode,
    handled: AtomicUsize,
    log: Arc<DeliveryLog>,
}

impl Mediator for Worker {
    fn name(&self) -> &str {
        &self.name
    }

    fn list_notification_interests(&self) -> Vec<NotificationCode> {
        vec![self.code]
    }

    fn handle_notification(&self, notification: &Notification) -> Result<()> {
        self.handled.fetch_add(1, Ordering::SeqCst);
        self.log.record(notification);
        Ok(())
    }
}

fn worker(name: String, code: NotificationCode, log: &Arc<DeliveryLog>) -> Arc<Worker> {
    Arc::new(Worker {
        name,
        code,
        handled: AtomicUsize::new(0),
        log: Arc::clone(log),
    })
}

#[test]
fn test_private_cycles_lose_nothing() {
    let facade = Facade::new();
    let log = Arc::new(DeliveryLog::default());

    thread::scope(|scope| {
        for t in 0..THREADS {
            let facade = Arc::clone(&facade);
            let log = Arc::clone(&log);
            scope.spawn(move || {
                let name = format!("worker-{}", t);
                let code = NotificationCode(1_000 + t as i32);

                for i in 0..ITERATIONS {
                    let w = worker(name.clone(), code, &log);
                    facade.register_controller(w.clone()).unwrap();
                    assert!(facade.has_controller(&name));

                    let id = (t * ITERATIONS + i) as u64;
                    facade.send_notification_with(code, id).unwrap();
                    assert_eq!(w.handled.load(Ordering::SeqCst), 1);

                    let removed = facade.remove_controller(&name).unwrap();
                    assert_eq!(removed.name(), name);
                    assert!(facade.remove_controller(&name).is_none());
                }
            });
        }
    });

    assert_eq!(log.seen.lock().len(), THREADS * ITERATIONS);
    assert_eq!(log.duplicates.load(Ordering::SeqCst), 0);
    assert!(facade.dispatcher().codes().is_empty());
}

#[test]
fn test_contended_name_never_double_delivers() {
    let facade = Facade::with_config(gridbus_core::BusConfig::default().warn_on_replace(false));
    let log = Arc::new(DeliveryLog::default());
    let next_id = AtomicU64::new(0);

    thread::scope(|scope| {
        for t in 0..THREADS {
            let facade = Arc::clone(&facade);
            let log = Arc::clone(&log);
            let next_id = &next_id;
            scope.spawn(move || {
                for i in 0..ITERATIONS {
                    match (t + i) % 4 {
                        0 | 1 => {
                            facade
                                .register_controller(worker("shared".into(), SHARED, &log))
                                .unwrap();
                        }
                        2 => {
                            facade.remove_controller("shared");
                        }
                        _ => {
                            let _ = facade.retrieve_controller("shared");
                        }
                    }

                    let id = next_id.fetch_add(1, Ordering::SeqCst);
                    facade.send_notification_with(SHARED, id).unwrap();
                }
            });
        }
    });

    assert_eq!(log.duplicates.load(Ordering::SeqCst), 0);

    let observers = facade.dispatcher().observer_count(SHARED);
    if facade.has_controller("shared") {
        assert_eq!(observers, 1);
    } else {
        assert_eq!(observers, 0);
    }
}

#[test]
fn test_contended_command_and_model_registration() {
    let facade = Facade::with_config(gridbus_core::BusConfig::default().warn_on_replace(false));
    let log = Arc::new(DeliveryLog::default());
    let next_id = AtomicU64::new(0);

    thread::scope(|scope| {
        for t in 0..THREADS {
            let facade = Arc::clone(&facade);
            let log = Arc::clone(&log);
            let next_id = &next_id;
            scope.spawn(move || {
                for i in 0..ITERATIONS {
                    if (t + i) % 3 == 0 {
                        let log = Arc::clone(&log);
                        facade.register_command(SHARED_COMMAND, move || {
                            let log = Arc::clone(&log);
                            SimpleCommand::new(move |n: &Notification| {
                                log.record(n);
                                Ok(())
                            })
                        });
                    } else if (t + i) % 7 == 0 {
                        facade.remove_command(SHARED_COMMAND);
                    }

                    facade.register_model(Arc::new(DataProxy::new("rows", i)));
                    let _ = facade.retrieve_model_as::<DataProxy<usize>>("rows");

                    let id = next_id.fetch_add(1, Ordering::SeqCst);
                    facade.send_notification_with(SHARED_COMMAND, id).unwrap();
                }
            });
        }
    });

    assert_eq!(log.duplicates.load(Ordering::SeqCst), 0);
    assert!(facade.has_model("rows"));
    assert_eq!(facade.models().len(), 1);
    assert!(facade.dispatcher().observer_count(SHARED_COMMAND) <= 1);
}
