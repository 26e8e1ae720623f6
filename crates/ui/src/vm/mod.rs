mod activity_vm;
mod session_vm;
mod time_fmt;

pub use activity_vm::{HeatmapCellVm, StripDayVm, map_heatmap_cells, map_strip_days};
pub use session_vm::{SessionRowVm, map_session_rows};
