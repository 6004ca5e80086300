use std::rc::Rc;
use yew::prelude::*;
use gloo_timers::callback::Timeout;

pub const NOTIFICATION_LIFETIME_MS: u32 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Danger,
    Warning,
    Info,
}

impl Severity {
    pub fn alert_class(&self) -> &'static str {
        match self {
            Severity::Success => "alert-success",
            Severity::Danger => "alert-danger",
            Severity::Warning => "alert-warning",
            Severity::Info => "alert-info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u32,
    pub text: String,
    pub severity: Severity,
}

pub enum NotificationAction {
    Push(Notification),
    Dismiss(u32),
}

/// Notifications currently on screen. Each one lives on its own timer, so
/// there is no ordering between them beyond display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Notifications {
    pub items: Vec<Notification>,
}

impl Notifications {
    pub fn push(&mut self, notification: Notification) {
        self.items.push(notification);
    }

    pub fn dismiss(&mut self, id: u32) {
        self.items.retain(|n| n.id != id);
    }
}

impl Reducible for Notifications {
    type Action = NotificationAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            NotificationAction::Push(notification) => next.push(notification),
            NotificationAction::Dismiss(id) => next.dismiss(id),
        }
        Rc::new(next)
    }
}

/// Returns a callback that shows a notification and removes it after five
/// seconds. The timer is never cancelled.
#[hook]
pub fn use_notifications() -> (UseReducerHandle<Notifications>, Callback<(String, Severity)>) {
    let notifications = use_reducer(Notifications::default);
    let next_id = use_mut_ref(|| 0u32);
    let notify = {
        let notifications = notifications.clone();
        Callback::from(move |(text, severity): (String, Severity)| {
            match severity {
                Severity::Danger => log::warn!("Alert: {}", text),
                _ => log::info!("Alert: {}", text),
            }
            let id = {
                let mut next_id = next_id.borrow_mut();
                *next_id += 1;
                *next_id
            };
            notifications.dispatch(NotificationAction::Push(Notification { id, text, severity }));
            let notifications = notifications.clone();
            Timeout::new(NOTIFICATION_LIFETIME_MS, move || {
                notifications.dispatch(NotificationAction::Dismiss(id));
            })
            .forget();
        })
    };
    (notifications, notify)
}

#[derive(Properties, PartialEq)]
pub struct NotificationStackProps {
    pub notifications: UseReducerHandle<Notifications>,
}

#[function_component(NotificationStack)]
pub fn notification_stack(props: &NotificationStackProps) -> Html {
    html! {
        <div class="alert-stack" style="position: fixed; top: 80px; left: 50%; transform: translateX(-50%); z-index: 1050;">
            { for props.notifications.items.iter().map(|notification| {
                let on_close = {
                    let notifications = props.notifications.clone();
                    let id = notification.id;
                    Callback::from(move |_: MouseEvent| {
                        notifications.dispatch(NotificationAction::Dismiss(id));
                    })
                };
                html! {
                    <div
                        key={notification.id}
                        class={classes!("alert", notification.severity.alert_class(), "alert-dismissible", "fade", "show")}
                        role="alert"
                    >
                        { &notification.text }
                        <button type="button" class="btn-close" aria-label="Cerrar" onclick={on_close}></button>
                    </div>
                }
            }) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifications_live_independently() {
        let mut notifications = Notifications::default();
        notifications.push(Notification { id: 1, text: "uno".into(), severity: Severity::Success });
        notifications.push(Notification { id: 2, text: "dos".into(), severity: Severity::Danger });

        notifications.dismiss(1);
        assert_eq!(notifications.items.len(), 1);
        assert_eq!(notifications.items[0].id, 2);

        // The timer and the close button may both dismiss the same alert.
        notifications.dismiss(1);
        assert_eq!(notifications.items.len(), 1);
    }

    #[test]
    fn reducer_pushes_and_dismisses() {
        let state = Rc::new(Notifications::default());
        let state = state.reduce(NotificationAction::Push(Notification {
            id: 7,
            text: "hola".into(),
            severity: Severity::Warning,
        }));
        assert_eq!(state.items[0].severity.alert_class(), "alert-warning");
        let id = state.items[0].id;
        let state = state.reduce(NotificationAction::Dismiss(id));
        assert!(state.items.is_empty());
    }
}
