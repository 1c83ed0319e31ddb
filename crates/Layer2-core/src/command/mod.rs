//! Command - 커맨드 계약, 복합 커맨드, 레지스트리
//!
//! - `traits.rs` - Command trait, CommandFactory, SimpleCommand
//! - `macro_command.rs` - MacroCommand (하위 커맨드 순차 실행)
//! - `registry.rs` - CommandRegistry (코드 → 팩토리)

mod macro_command;
mod registry;
mod traits;

pub use macro_command::{MacroCommand, SubCommands};
pub use registry::CommandRegistry;
pub use traits::{command_factory, Command, CommandFactory, SimpleCommand};
