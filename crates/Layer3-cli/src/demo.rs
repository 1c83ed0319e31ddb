//! `gridbus demo` - 정렬 가능한 그리드 하나를 버스로 엮어 실행
//!
//! ```text
//!   [header:Last] ──click──▶ SORT_REQUESTED(name=Last)
//!                                   │
//!                          SortRows (MacroCommand)
//!                          ├─ ToggleSort  → sort-state proxy
//!                          └─ ApplySort   → rows proxy
//!                                   │
//!   [header:*]  ◀── SORT_APPLIED(name=Last, body=Direction)
//! ```
//!
//! 헤더 Mediator 는 모두 SORT_APPLIED 를 구독하고 `name` 으로 자기 열인지 거릅니다.

use gridbus_core::{
    BusConfig, Command, DataProxy, Error, Facade, MacroCommand, Mediator, Notification,
    NotificationCode, Notifier, Result, ViewComponent,
};
use parking_lot::Mutex;
use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

pub const SORT_REQUESTED: NotificationCode = NotificationCode(100);
pub const SORT_APPLIED: NotificationCode = NotificationCode(101);

const ROWS: &str = "rows";
const SORT_STATE: &str = "sort-state";

// ============================================================================
// Domain
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    First,
    Last,
    Age,
}

impl Column {
    pub const ALL: [Column; 3] = [Column::First, Column::Last, Column::Age];

    pub fn label(&self) -> &'static str {
        match self {
            Column::First => "First",
            Column::Last => "Last",
            Column::Age => "Age",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    fn compare(&self, a: &Row, b: &Row) -> Ordering {
        match self {
            Column::First => a.first.cmp(b.first),
            Column::Last => a.last.cmp(b.last),
            Column::Age => a.age.cmp(&b.age),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    fn flip(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }

    fn arrow(self) -> &'static str {
        match self {
            Direction::Ascending => "▲",
            Direction::Descending => "▼",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub first: &'static str,
    pub last: &'static str,
    pub age: u32,
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<8} {:<10} {:>3}", self.first, self.last, self.age)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SortState {
    pub column: Option<Column>,
    pub direction: Direction,
}

fn sample_rows() -> Vec<Row> {
    vec![
        Row {
            first: "Ada",
            last: "Lovelace",
            age: 36,
        },
        Row {
            first: "Alan",
            last: "Turing",
            age: 41,
        },
        Row {
            first: "Grace",
            last: "Hopper",
            age: 85,
        },
        Row {
            first: "Edsger",
            last: "Dijkstra",
            age: 72,
        },
        Row {
            first: "Barbara",
            last: "Liskov",
            age: 29,
        },
    ]
}

// ============================================================================
// View + Mediator
// ============================================================================

/// 헤더 셀 (뷰). Mediator 는 이것을 약하게만 참조
pub struct HeaderCell {
    column: Column,
    indicator: Mutex<Option<Direction>>,
}

impl HeaderCell {
    pub fn new(column: Column) -> Arc<Self> {
        Arc::new(Self {
            column,
            indicator: Mutex::new(None),
        })
    }

    pub fn indicator(&self) -> Option<Direction> {
        *self.indicator.lock()
    }

    fn render(&self) -> String {
        match self.indicator() {
            Some(direction) => format!("{}{}", self.column.label(), direction.arrow()),
            None => self.column.label().to_string(),
        }
    }
}

/// 열 헤더 Mediator
pub struct SortHeader {
    name: String,
    column: Column,
    view: ViewComponent<HeaderCell>,
    notifier: Notifier,
}

impl SortHeader {
    pub fn new(cell: &Arc<HeaderCell>, notifier: Notifier) -> Self {
        Self {
            name: header_name(cell.column),
            column: cell.column,
            view: ViewComponent::new(cell),
            notifier,
        }
    }

    /// 헤더 클릭 → 정렬 요청
    pub fn click(&self) -> Result<()> {
        self.notifier
            .notify_observers(&Notification::new(SORT_REQUESTED).with_name(self.column.label()))
    }
}

impl Mediator for SortHeader {
    fn name(&self) -> &str {
        &self.name
    }

    fn view_component(&self) -> Option<Arc<dyn Any + Send + Sync>> {
        self.view.as_any()
    }

    fn list_notification_interests(&self) -> Vec<NotificationCode> {
        vec![SORT_APPLIED]
    }

    fn handle_notification(&self, notification: &Notification) -> Result<()> {
        let indicator = if notification.name() == Some(self.column.label()) {
            notification.body::<Direction>().copied()
        } else {
            None
        };

        if let Some(cell) = self.view.get() {
            *cell.indicator.lock() = indicator;
        }
        Ok(())
    }
}

pub fn header_name(column: Column) -> String {
    format!("header:{}", column.label())
}

// ============================================================================
// Commands
// ============================================================================

/// 같은 열이면 방향 반전, 다른 열이면 오름차순으로 시작
struct ToggleSort {
    notifier: Notifier,
}

impl Command for ToggleSort {
    fn execute(&self, notification: &Notification) -> Result<()> {
        let column = requested_column(notification)?;
        let Some(facade) = self.notifier.facade() else {
            return Ok(());
        };

        let state = facade
            .retrieve_model_as::<DataProxy<SortState>>(SORT_STATE)
            .ok_or_else(|| Error::NotFound(SORT_STATE.to_string()))?;

        state.update(|s| {
            if s.column == Some(column) {
                s.direction = s.direction.flip();
            } else {
                s.column = Some(column);
                s.direction = Direction::Ascending;
            }
        });
        Ok(())
    }
}

/// 현재 정렬 상태대로 행을 정렬하고 결과를 발행
struct ApplySort {
    notifier: Notifier,
}

impl Command for ApplySort {
    fn execute(&self, notification: &Notification) -> Result<()> {
        let Some(facade) = self.notifier.facade() else {
            return Ok(());
        };

        let state = facade
            .retrieve_model_as::<DataProxy<SortState>>(SORT_STATE)
            .ok_or_else(|| Error::NotFound(SORT_STATE.to_string()))?
            .get();
        let Some(column) = state.column else {
            return Err(Error::command(
                notification.code(),
                "sort requested before a column was chosen",
            ));
        };

        let rows = facade
            .retrieve_model_as::<DataProxy<Vec<Row>>>(ROWS)
            .ok_or_else(|| Error::NotFound(ROWS.to_string()))?;
        rows.update(|rows| {
            rows.sort_by(|a, b| match state.direction {
                Direction::Ascending => column.compare(a, b),
                Direction::Descending => column.compare(b, a),
            })
        });
        debug!(column = column.label(), direction = ?state.direction, "Rows sorted");

        self.notifier.notify_observers(
            &Notification::with_payload(SORT_APPLIED, state.direction).with_name(column.label()),
        )
    }
}

fn requested_column(notification: &Notification) -> Result<Column> {
    let label = notification
        .name()
        .ok_or_else(|| Error::InvalidInput("sort request without a column name".into()))?;
    Column::from_label(label)
        .ok_or_else(|| Error::InvalidInput(format!("unknown column: {}", label)))
}

fn sort_rows(notifier: Notifier) -> MacroCommand {
    MacroCommand::new(move |subs| {
        let toggle = notifier.clone();
        subs.add_sub_command(move || ToggleSort {
            notifier: toggle.clone(),
        })
        .add_sub_command(move || ApplySort {
            notifier: notifier.clone(),
        });
    })
}

// ============================================================================
// Grid
// ============================================================================

/// 버스에 연결된 그리드 (헤더 뷰는 여기서 소유)
pub struct Grid {
    facade: Arc<Facade>,
    headers: Vec<Arc<HeaderCell>>,
}

impl Grid {
    pub fn new(config: BusConfig) -> Result<Self> {
        let facade = Facade::with_config(config);

        facade.register_model(Arc::new(DataProxy::new(ROWS, sample_rows())));
        facade.register_model(Arc::new(DataProxy::new(SORT_STATE, SortState::default())));

        let headers: Vec<_> = Column::ALL.into_iter().map(HeaderCell::new).collect();
        for cell in &headers {
            facade.register_controller(Arc::new(SortHeader::new(cell, facade.notifier())))?;
        }

        let notifier = facade.notifier();
        facade.register_command(SORT_REQUESTED, move || sort_rows(notifier.clone()));

        Ok(Self { facade, headers })
    }

    pub fn click(&self, column: Column) -> Result<()> {
        let header = self
            .facade
            .retrieve_controller_as::<SortHeader>(&header_name(column))
            .ok_or_else(|| Error::NotFound(header_name(column)))?;
        header.click()
    }

    pub fn rows(&self) -> Vec<Row> {
        self.facade
            .retrieve_model_as::<DataProxy<Vec<Row>>>(ROWS)
            .map(|rows| rows.get().as_ref().clone())
            .unwrap_or_default()
    }

    pub fn header_line(&self) -> String {
        self.headers
            .iter()
            .map(|cell| cell.render())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl Drop for Grid {
    fn drop(&mut self) {
        self.facade.clear();
    }
}

pub fn run(config: BusConfig) -> anyhow::Result<()> {
    let grid = Grid::new(config)?;
    info!("Grid wired: {} headers", grid.headers.len());

    print_grid(&grid, "initial");
    for column in [Column::Last, Column::Age, Column::Age] {
        grid.click(column)?;
        print_grid(&grid, &format!("click {}", column.label()));
    }

    Ok(())
}

fn print_grid(grid: &Grid, title: &str) {
    println!("── {} ──", title);
    println!("  {}", grid.header_line());
    for row in grid.rows() {
        println!("  {}", row);
    }
    println!();
}
