// 🔔 Notifications - fire-and-forget messages for the presentation layer

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Success,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }
}

/// Receives transient messages. No acknowledgment is expected.
pub trait NotificationSink {
    fn notify(&mut self, notice: Notice);
}

/// Collects notices in order.
impl NotificationSink for Vec<Notice> {
    fn notify(&mut self, notice: Notice) {
        self.push(notice);
    }
}

/// Forwards notices to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&mut self, notice: Notice) {
        tracing::info!(level = ?notice.level, "{}", notice.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_collects_in_order() {
        let mut sink: Vec<Notice> = Vec::new();
        sink.notify(Notice::success("first"));
        sink.notify(Notice::info("second"));

        assert_eq!(sink.len(), 2);
        assert_eq!(sink[0].message, "first");
        assert_eq!(sink[1].level, NoticeLevel::Info);
    }
}
