use std::{cell::RefCell, rc::Rc};

use broadside_shared::{
    Behaviour, ComponentKind, EntityId, Observer, Requirement, Score, Subscription, World,
};

use crate::presentation::{ScoreCanvas, UiRoot};

// Only the client with write authority over its ship's ClientAuthorityCheck
// attaches this, so each player sees their own score and nobody else's.
const REQUIREMENTS: &[Requirement] = &[
    Requirement::Write(ComponentKind::ClientAuthorityCheck),
    Requirement::Read(ComponentKind::Score),
];

struct ScoreGuiState {
    canvas: Option<Box<dyn ScoreCanvas>>,
}

impl ScoreGuiState {
    fn update_gui(&mut self, score: i32) {
        let Some(canvas) = self.canvas.as_mut() else {
            return;
        };
        if score > 0 {
            canvas.set_active(true);
            canvas.set_text(&score.to_string());
        } else {
            canvas.set_active(false);
        }
    }
}

impl Observer<Score> for ScoreGuiState {
    fn on_update(&mut self, score: &Score) {
        self.update_gui(score.number_of_points);
    }
}

/// Shows the local player's score once it is above zero
pub struct ScoreGui {
    state: Rc<RefCell<ScoreGuiState>>,
    subscription: Option<Subscription>,
}

impl ScoreGui {
    /// Looks the score canvas up under `ui_root`, hiding it until there is
    /// something to show. Without a canvas the behaviour does nothing.
    pub fn new(ui_root: &dyn UiRoot) -> Self {
        let mut state = ScoreGuiState {
            canvas: ui_root.find_score_canvas(),
        };
        state.update_gui(0);

        Self {
            state: Rc::new(RefCell::new(state)),
            subscription: None,
        }
    }

    pub fn has_canvas(&self) -> bool {
        self.state.borrow().canvas.is_some()
    }

    pub fn on_update(&mut self, score: &Score) {
        self.state.borrow_mut().on_update(score);
    }
}

impl Behaviour for ScoreGui {
    fn name(&self) -> &'static str {
        "ScoreGui"
    }

    fn requirements(&self) -> &'static [Requirement] {
        REQUIREMENTS
    }

    fn on_attach(&mut self, entity: &EntityId, world: &mut World) {
        if let Some(score) = world.current_value::<Score>(entity) {
            self.state.borrow_mut().on_update(score);
        }

        if let Some(previous) = self.subscription.take() {
            world.unsubscribe(previous);
        }
        self.subscription = Some(world.observe::<Score, _>(entity, self.state.clone()));
    }

    fn on_detach(&mut self, _entity: &EntityId, world: &mut World) {
        if let Some(subscription) = self.subscription.take() {
            world.unsubscribe(subscription);
        }
    }
}
