//! `gridbus stress` - 하나의 Facade 를 여러 스레드에서 동시에 조작
//!
//! 각 워커는 반복마다 다음 중 하나를 수행하고, 고유 id 를 담아 알림을 보냅니다.
//!
//! - 공유 이름(`shared`) Mediator 등록/교체/제거
//! - 공유 코드 커맨드 등록/제거
//! - 자기 전용 Mediator 등록 → 발행 → 제거 (정확히 한 번 전달되어야 함)
//!
//! 같은 id 가 두 번 전달되거나 전용 Mediator 의 호출 횟수가 어긋나면 실패합니다.

use anyhow::{bail, Context};
use gridbus_core::{
    BusConfig, Facade, Mediator, Notification, NotificationCode, Result, SimpleCommand,
};
use parking_lot::Mutex;
use rayon::prelude::*;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

const SHARED: NotificationCode = NotificationCode(1);
const SHARED_COMMAND: NotificationCode = NotificationCode(2);
const PRIVATE_BASE: i32 = 10_000;

// ============================================================================
// Counters
// ============================================================================

#[derive(Default)]
struct Counters {
    seen: Mutex<HashSet<u64>>,
    delivered: AtomicUsize,
    duplicates: AtomicUsize,
    registered: AtomicUsize,
    removed: AtomicUsize,
    missed: AtomicUsize,
}

impl Counters {
    fn record(&self, notification: &Notification) {
        self.delivered.fetch_add(1, Ordering::Relaxed);
        if let Some(id) = notification.body::<u64>() {
            if !self.seen.lock().insert(*id) {
                self.duplicates.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}

/// 카운터에 전달을 기록하는 Mediator
struct Probe {
    name: String,
    code: NotificationCode,
    calls: AtomicUsize,
    counters: Arc<Counters>,
}

impl Probe {
    fn new(name: String, code: NotificationCode, counters: &Arc<Counters>) -> Arc<Self> {
        Arc::new(Self {
            name,
            code,
            calls: AtomicUsize::new(0),
            counters: Arc::clone(counters),
        })
    }
}

impl Mediator for Probe {
    fn name(&self) -> &str {
        &self.name
    }

    fn list_notification_interests(&self) -> Vec<NotificationCode> {
        vec![self.code]
    }

    fn handle_notification(&self, notification: &Notification) -> Result<()> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.counters.record(notification);
        Ok(())
    }
}

// ============================================================================
// Runner
// ============================================================================

/// soak 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StressReport {
    pub sends: u64,
    pub delivered: usize,
    pub duplicates: usize,
    pub registered: usize,
    pub removed: usize,
    pub missed: usize,
    pub dangling: bool,
}

impl StressReport {
    pub fn is_clean(&self) -> bool {
        self.duplicates == 0 && self.missed == 0 && !self.dangling
    }
}

pub fn run(config: BusConfig, threads: usize, iterations: usize) -> anyhow::Result<()> {
    let threads = threads.max(1);
    let started = Instant::now();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("Failed to build worker pool")?;
    info!(threads, iterations, "Starting stress run");

    let report = pool.install(|| soak(config, threads, iterations))?;

    println!("threads      {}", threads);
    println!("iterations   {}", iterations);
    println!("sends        {}", report.sends);
    println!("delivered    {}", report.delivered);
    println!("registered   {}", report.registered);
    println!("removed      {}", report.removed);
    println!("duplicates   {}", report.duplicates);
    println!("missed       {}", report.missed);
    println!("elapsed      {:.2?}", started.elapsed());

    if !report.is_clean() {
        bail!(
            "Stress run failed: {} duplicate deliveries, {} missed deliveries, dangling observers: {}",
            report.duplicates,
            report.missed,
            report.dangling
        );
    }
    Ok(())
}

/// 현재 rayon 풀에서 `workers` 개 작업을 병렬 실행
pub fn soak(config: BusConfig, workers: usize, iterations: usize) -> Result<StressReport> {
    // 교체가 매우 잦으므로 경고 로그는 끔
    let facade = Facade::with_config(config.warn_on_replace(false));
    let counters = Arc::new(Counters::default());
    let next_id = AtomicU64::new(0);

    (0..workers).into_par_iter().try_for_each(|worker| -> Result<()> {
        let private_name = format!("private-{}", worker);
        let private_code = NotificationCode(PRIVATE_BASE + worker as i32);

        for i in 0..iterations {
            match (worker + i) % 5 {
                0 | 1 => {
                    facade.register_controller(Probe::new("shared".into(), SHARED, &counters))?;
                    counters.registered.fetch_add(1, Ordering::Relaxed);
                }
                2 => {
                    if facade.remove_controller("shared").is_some() {
                        counters.removed.fetch_add(1, Ordering::Relaxed);
                    }
                }
                3 => {
                    let counters = Arc::clone(&counters);
                    facade.register_command(SHARED_COMMAND, move || {
                        let counters = Arc::clone(&counters);
                        SimpleCommand::new(move |n: &Notification| {
                            counters.record(n);
                            Ok(())
                        })
                    });
                }
                _ => {
                    facade.remove_command(SHARED_COMMAND);
                }
            }

            let id = next_id.fetch_add(1, Ordering::Relaxed);
            facade.send_notification_with(SHARED, id)?;
            let id = next_id.fetch_add(1, Ordering::Relaxed);
            facade.send_notification_with(SHARED_COMMAND, id)?;

            // 전용 Mediator 는 경쟁이 없으므로 정확히 한 번
            let probe = Probe::new(private_name.clone(), private_code, &counters);
            facade.register_controller(probe.clone())?;
            let id = next_id.fetch_add(1, Ordering::Relaxed);
            facade.send_notification_with(private_code, id)?;
            if facade.remove_controller(&private_name).is_none()
                || probe.calls.load(Ordering::Relaxed) != 1
            {
                counters.missed.fetch_add(1, Ordering::Relaxed);
            }
        }
        Ok(())
    })?;

    let dispatcher = facade.dispatcher();
    let dangling = dispatcher.observer_count(SHARED) != usize::from(facade.has_controller("shared"))
        || dispatcher.observer_count(SHARED_COMMAND)
            != usize::from(facade.has_command(SHARED_COMMAND))
        || (0..workers).any(|w| dispatcher.has_observers(NotificationCode(PRIVATE_BASE + w as i32)));
    if dangling {
        warn!("Observers left behind after stress run");
    }

    let report = StressReport {
        sends: next_id.load(Ordering::Relaxed),
        delivered: counters.delivered.load(Ordering::Relaxed),
        duplicates: counters.duplicates.load(Ordering::Relaxed),
        registered: counters.registered.load(Ordering::Relaxed),
        removed: counters.removed.load(Ordering::Relaxed),
        missed: counters.missed.load(Ordering::Relaxed),
        dangling,
    };

    facade.clear();
    Ok(report)
}
