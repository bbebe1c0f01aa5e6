pub mod chart;
pub mod readout;
pub mod selector;

pub use chart::ChartWidget;
pub use readout::ReadoutWidget;
pub use selector::WindowPicker;
