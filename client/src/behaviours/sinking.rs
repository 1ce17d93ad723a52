use std::{cell::RefCell, rc::Rc};

use log::debug;

use broadside_shared::{
    Behaviour, ComponentKind, EntityId, Health, Observer, Requirement, Subscription, World,
};

use crate::presentation::Animation;

const REQUIREMENTS: &[Requirement] = &[Requirement::Read(ComponentKind::Health)];

struct SinkingState {
    animation: Box<dyn Animation>,
    already_sunk: bool,
}

impl SinkingState {
    fn visualise_sinking(&mut self) {
        self.animation.play();
    }

    /// A worker checking the ship out after it sank must not show it afloat,
    /// so a sunk ship jumps straight to the end of the sinking animation
    fn catch_up(&mut self, health: &Health) {
        if health.is_sunk() {
            debug!("Ship already sunk on checkout, skipping to end of animation");
            self.animation.jump_to_end();
            self.visualise_sinking();
            self.already_sunk = true;
        }
    }
}

impl Observer<Health> for SinkingState {
    fn on_update(&mut self, health: &Health) {
        if !self.already_sunk && health.is_sunk() {
            self.visualise_sinking();
            self.already_sunk = true;
        }
    }
}

/// Plays the sinking animation once a ship's health reaches zero
pub struct SinkingBehaviour {
    state: Rc<RefCell<SinkingState>>,
    subscription: Option<Subscription>,
}

impl SinkingBehaviour {
    pub fn new(animation: Box<dyn Animation>) -> Self {
        Self {
            state: Rc::new(RefCell::new(SinkingState {
                animation,
                already_sunk: false,
            })),
            subscription: None,
        }
    }

    pub fn already_sunk(&self) -> bool {
        self.state.borrow().already_sunk
    }

    pub fn on_update(&mut self, health: &Health) {
        self.state.borrow_mut().on_update(health);
    }
}

impl Behaviour for SinkingBehaviour {
    fn name(&self) -> &'static str {
        "SinkingBehaviour"
    }

    fn requirements(&self) -> &'static [Requirement] {
        REQUIREMENTS
    }

    fn on_attach(&mut self, entity: &EntityId, world: &mut World) {
        {
            let mut state = self.state.borrow_mut();
            state.already_sunk = false;
            if let Some(health) = world.current_value::<Health>(entity) {
                state.catch_up(health);
            }
        }

        if let Some(previous) = self.subscription.take() {
            world.unsubscribe(previous);
        }
        self.subscription = Some(world.observe::<Health, _>(entity, self.state.clone()));
    }

    fn on_detach(&mut self, _entity: &EntityId, world: &mut World) {
        if let Some(subscription) = self.subscription.take() {
            world.unsubscribe(subscription);
        }
    }
}
