use crate::world::{component::ComponentUpdate, delegation::writer::WriteProof};

/// Points a ship has earned by sinking others
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Score {
    pub number_of_points: i32,
}

impl Score {
    pub fn new(number_of_points: i32) -> Self {
        Self { number_of_points }
    }

    pub(crate) fn apply(&mut self, update: &ScoreUpdate) {
        if let Some(number_of_points) = update.number_of_points {
            self.number_of_points = number_of_points;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreUpdate {
    number_of_points: Option<i32>,
}

impl ScoreUpdate {
    pub fn set_number_of_points(mut self, number_of_points: i32) -> Self {
        self.number_of_points = Some(number_of_points);
        self
    }

    pub fn number_of_points(&self) -> Option<i32> {
        self.number_of_points
    }
}

impl ComponentUpdate for ScoreUpdate {
    fn new(_proof: WriteProof) -> Self {
        Self {
            number_of_points: None,
        }
    }

    fn is_empty(&self) -> bool {
        self.number_of_points.is_none()
    }
}
