use crate::actions::EventAction;
use crate::twitter::StreamEvent;

/// 1 イベントをどう扱ったか
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Dispatch {
    Handled,
    /// 自分のツイート。拾うと無限にリツイートしてしまう
    OwnTweet,
    /// friends リストや delete 通知など、ツイートでないもの
    Control,
}

pub(crate) async fn dispatch(
    event: &StreamEvent,
    screen_name: &str,
    action: &dyn EventAction,
) -> Dispatch {
    if !event.is_status() {
        tracing::debug!("skip control message");
        return Dispatch::Control;
    }

    if event.is_authored_by(screen_name) {
        tracing::debug!(id = event.id, "skip own tweet");
        return Dispatch::OwnTweet;
    }

    tracing::debug!(author = %event.author(), id = event.id, "(stream) tweet");
    action.handle(event).await;
    Dispatch::Handled
}
