use std::fmt;

/// Identifier the deployment uses to address a single worker process.
pub type WorkerId = String;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WorkerType {
    /// Headless simulation worker, usually holding write authority
    UnityWorker,
    /// Player-facing worker, mostly observing
    UnityClient,
    /// Ship steering worker
    PirateShipMovement,
}

impl WorkerType {
    pub fn name(&self) -> &'static str {
        match self {
            WorkerType::UnityWorker => "UnityWorker",
            WorkerType::UnityClient => "UnityClient",
            WorkerType::PirateShipMovement => "PirateShipMovement",
        }
    }

    pub fn is_client(&self) -> bool {
        matches!(self, WorkerType::UnityClient)
    }
}

impl fmt::Display for WorkerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
