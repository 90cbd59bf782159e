//! Task box: unscheduled chores held until they are given a date.

use serde::Serialize;

use crate::client::SkylightClient;
use crate::error::SkylightError;
use crate::types::{Envelope, TaskBoxItem};

const TASK_BOX_ENDPOINT: &str = "/api/frames/{frame_id}/task_box/items";

/// Fields for a new task box item. Only `summary` is required.
#[derive(Debug, Clone, Default)]
pub struct NewTaskBoxItem {
    pub summary: String,
    pub emoji_icon: Option<String>,
    pub routine: bool,
    pub reward_points: Option<i64>,
}

#[derive(Debug, Serialize)]
struct TaskBoxWriteBody {
    data: TaskBoxWriteData,
}

#[derive(Debug, Serialize)]
struct TaskBoxWriteData {
    #[serde(rename = "type")]
    kind: &'static str,
    attributes: TaskBoxWriteAttributes,
}

#[derive(Debug, Serialize)]
struct TaskBoxWriteAttributes {
    summary: String,
    emoji_icon: Option<String>,
    routine: bool,
    reward_points: Option<i64>,
}

impl SkylightClient {
    /// Create a task box item.
    ///
    /// # Errors
    /// Returns classified API errors.
    pub async fn create_task_box_item(
        &self,
        new: NewTaskBoxItem,
    ) -> Result<TaskBoxItem, SkylightError> {
        let body = TaskBoxWriteBody {
            data: TaskBoxWriteData {
                kind: "task_box_item",
                attributes: TaskBoxWriteAttributes {
                    summary: new.summary,
                    emoji_icon: new.emoji_icon,
                    routine: new.routine,
                    reward_points: new.reward_points,
                },
            },
        };

        let envelope: Envelope<TaskBoxItem> = self
            .post(TASK_BOX_ENDPOINT, &body)
            .await
            .map_err(|e| e.for_kind("task box item"))?;
        Ok(envelope.data)
    }
}
