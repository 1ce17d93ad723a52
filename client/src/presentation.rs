/// An animation clip attached to the ship's model
pub trait Animation {
    fn play(&mut self);
    /// Skips every state of the clip to its final frame
    fn jump_to_end(&mut self);
}

/// The overlay showing the player's score
pub trait ScoreCanvas {
    fn set_active(&mut self, active: bool);
    fn set_text(&mut self, text: &str);
}

/// Scene root the UI is looked up from
pub trait UiRoot {
    /// Returns `None` when the scene has no score canvas
    fn find_score_canvas(&self) -> Option<Box<dyn ScoreCanvas>>;
}
