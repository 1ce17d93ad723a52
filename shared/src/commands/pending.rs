use std::{cell::RefCell, rc::Rc};

use log::{debug, warn};

use crate::commands::{
    descriptor::{CommandDescriptor, CommandRequestId, CommandResponse},
    error::{CommandError, StatusCode},
};

type SuccessFn<C> = Box<dyn FnOnce(<C as CommandDescriptor>::Response)>;
type FailureFn = Box<dyn FnOnce(CommandError)>;

// PendingSlot
struct PendingSlot<C: CommandDescriptor> {
    on_success: Option<SuccessFn<C>>,
    on_failure: Option<FailureFn>,
    // holds the outcome until a matching continuation is registered
    outcome: Option<Result<C::Response, CommandError>>,
    resolved: bool,
}

enum Delivery<C: CommandDescriptor> {
    Success(SuccessFn<C>, C::Response),
    Failure(FailureFn, CommandError),
}

impl<C: CommandDescriptor> PendingSlot<C> {
    fn new() -> Self {
        Self {
            on_success: None,
            on_failure: None,
            outcome: None,
            resolved: false,
        }
    }

    fn take_delivery(&mut self) -> Option<Delivery<C>> {
        match self.outcome.take()? {
            Ok(response) => match self.on_success.take() {
                Some(handler) => {
                    self.on_failure = None;
                    Some(Delivery::Success(handler, response))
                }
                None => {
                    self.outcome = Some(Ok(response));
                    None
                }
            },
            Err(error) => match self.on_failure.take() {
                Some(handler) => {
                    self.on_success = None;
                    Some(Delivery::Failure(handler, error))
                }
                None => {
                    self.outcome = Some(Err(error));
                    None
                }
            },
        }
    }
}

// the slot's borrow is released before a continuation runs
fn deliver<C: CommandDescriptor>(slot: &Rc<RefCell<PendingSlot<C>>>) {
    let delivery = slot.borrow_mut().take_delivery();
    match delivery {
        Some(Delivery::Success(handler, response)) => handler(response),
        Some(Delivery::Failure(handler, error)) => handler(error),
        None => {}
    }
}

/// Handle to a dispatched command.
///
/// Resolves exactly once, to either the `on_success` or the `on_failure`
/// continuation. Continuations may be registered before or after the
/// resolution arrives.
#[must_use = "register on_success / on_failure to observe the command's outcome"]
pub struct PendingCommand<C: CommandDescriptor> {
    request_id: CommandRequestId,
    slot: Rc<RefCell<PendingSlot<C>>>,
}

impl<C: CommandDescriptor> PendingCommand<C> {
    pub(crate) fn new(request_id: CommandRequestId) -> (Self, Box<dyn ResolveCommand>) {
        let slot = Rc::new(RefCell::new(PendingSlot::new()));
        let resolver = Box::new(SlotResolver::<C> { slot: slot.clone() });
        (Self { request_id, slot }, resolver)
    }

    pub fn request_id(&self) -> CommandRequestId {
        self.request_id
    }

    pub fn is_resolved(&self) -> bool {
        self.slot.borrow().resolved
    }

    pub fn on_success<F: FnOnce(C::Response) + 'static>(self, handler: F) -> Self {
        self.slot.borrow_mut().on_success = Some(Box::new(handler));
        deliver(&self.slot);
        self
    }

    pub fn on_failure<F: FnOnce(CommandError) + 'static>(self, handler: F) -> Self {
        self.slot.borrow_mut().on_failure = Some(Box::new(handler));
        deliver(&self.slot);
        self
    }
}

// ResolveCommand
pub(crate) trait ResolveCommand {
    fn command_name(&self) -> &'static str;
    fn resolve(self: Box<Self>, outcome: Result<CommandResponse, CommandError>);
}

struct SlotResolver<C: CommandDescriptor> {
    slot: Rc<RefCell<PendingSlot<C>>>,
}

impl<C: CommandDescriptor> ResolveCommand for SlotResolver<C> {
    fn command_name(&self) -> &'static str {
        C::name()
    }

    fn resolve(self: Box<Self>, outcome: Result<CommandResponse, CommandError>) {
        let typed_outcome = match outcome {
            Ok(response) => C::unwrap_response(response).ok_or_else(|| {
                CommandError::new(
                    StatusCode::InternalError,
                    format!("response payload does not belong to {}", C::name()),
                )
            }),
            Err(error) => Err(error),
        };

        {
            let mut slot = self.slot.borrow_mut();
            if slot.resolved {
                warn!("{} command resolved twice, ignoring", C::name());
                return;
            }
            slot.resolved = true;
            if slot.on_success.is_none() && slot.on_failure.is_none() {
                debug!("{} command resolved before any continuation was registered", C::name());
            }
            slot.outcome = Some(typed_outcome);
        }

        deliver(&self.slot);
    }
}
