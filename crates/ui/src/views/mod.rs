mod history;
mod home;
mod quotes;
mod state;

#[cfg(test)]
pub mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use history::HistoryView;
pub use home::HomeView;
pub use quotes::QuotePanel;
pub use state::{ViewError, ViewState, view_state_from_resource};
