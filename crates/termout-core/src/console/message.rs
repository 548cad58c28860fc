/// One unit of work for the coordinator. Ownership moves into the queue on enqueue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Plain text, written as-is (callers supply their own newlines).
    Print(String),
    /// Rendered bar frame; overwrites the current line.
    ProgressFrame(String),
    /// Erase the bar line if one is showing.
    HideProgress,
}

/// What actually travels through the queue. `Stop` shares the FIFO with
/// messages, so it can never overtake anything enqueued before it.
#[derive(Debug)]
pub(super) enum Envelope {
    Message(Message),
    Stop,
}
