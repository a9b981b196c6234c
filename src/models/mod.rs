mod notification;
mod request;

pub use notification::{NotificationContent, OutboundMessage, Target};
pub use request::{
    GenericNotificationRequest, NotificationRequest, PreparedNotification,
    ProductNotificationRequest, GENERIC_REQUIRED_MESSAGE, PRODUCT_REQUIRED_MESSAGE,
    TARGET_CONFLICT_MESSAGE,
};
