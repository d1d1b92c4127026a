// Front ends over squad-core: the interactive menu, the terminal dashboard,
// JSON reports, and the plain-text renderings they share.

pub mod dashboard;
pub mod export;
pub mod menu;
pub mod text;
