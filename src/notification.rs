use serde::Deserialize;
use std::cell::RefCell;
use std::rc::Rc;

use crate::calendar::DayClick;

/// Surfaces a day click when no day-click handler is registered.
pub trait Notify {
    fn notify(&self, click: &DayClick);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notify for LogNotifier {
    fn notify(&self, click: &DayClick) {
        log::info!("day clicked: {}", click);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutNotifier;

impl Notify for StdoutNotifier {
    fn notify(&self, click: &DayClick) {
        println!("{}", click);
    }
}

/// Collects clicks as lines for a host that writes them to its own output.
#[derive(Debug, Default, Clone)]
pub struct MessageNotifier {
    messages: Rc<RefCell<Vec<String>>>,
}

impl MessageNotifier {
    pub fn new(messages: Rc<RefCell<Vec<String>>>) -> Self {
        MessageNotifier { messages }
    }
}

impl Notify for MessageNotifier {
    fn notify(&self, click: &DayClick) {
        self.messages.borrow_mut().push(click.to_string());
    }
}

#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    appname: String,
}

impl DesktopNotifier {
    pub fn new(appname: &str) -> Self {
        DesktopNotifier {
            appname: appname.to_owned(),
        }
    }
}

impl Notify for DesktopNotifier {
    fn notify(&self, click: &DayClick) {
        let result = notify_rust::Notification::new()
            .appname(&self.appname)
            .summary(&click.to_string())
            .timeout(notify_rust::Timeout::Milliseconds(5000))
            .show();

        if let Err(e) = result {
            // fall back to the log
            log::warn!("could not show desktop notification: {}", e);
            LogNotifier.notify(click);
        }
    }
}

/// Notification backend selectable from the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Log,
    Stdout,
    Desktop,
}

impl Default for NotificationKind {
    fn default() -> Self {
        NotificationKind::Stdout
    }
}

impl NotificationKind {
    pub fn notifier(&self) -> Box<dyn Notify> {
        match self {
            NotificationKind::Log => Box::new(LogNotifier),
            NotificationKind::Stdout => Box::new(StdoutNotifier),
            NotificationKind::Desktop => Box::new(DesktopNotifier::new(env!("CARGO_PKG_NAME"))),
        }
    }
}
