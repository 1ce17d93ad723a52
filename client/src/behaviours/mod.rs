pub mod score_gui;
pub mod sinking;
