mod app;
mod state;

pub use app::launch_gui;
