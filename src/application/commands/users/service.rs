use std::sync::Arc;

use crate::application::ports::time::Clock;
use crate::application::recorder::ActivityRecorder;
use crate::domain::user::UserRepository;

pub struct UserCommandService {
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) recorder: ActivityRecorder,
}

impl UserCommandService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock>,
        recorder: ActivityRecorder,
    ) -> Self {
        Self {
            user_repo,
            clock,
            recorder,
        }
    }
}
