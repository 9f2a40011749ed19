pub mod bar;
pub mod execution;
pub mod interval;

pub use bar::Bar;
pub use execution::Execution;
pub use interval::Interval;
