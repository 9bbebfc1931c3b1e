/// One-shot deferred events, fired from the frame loop once their time is due.
#[derive(Clone, Debug)]
pub struct Timer<E> {
    pending: Vec<Scheduled<E>>,
    next_seq: u64,
}

#[derive(Clone, Debug)]
struct Scheduled<E> {
    fire_at_ms: f64,
    seq: u64,
    event: E,
}

impl<E> Default for Timer<E> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            next_seq: 0,
        }
    }
}

impl<E> Timer<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delayed_call(&mut self, now_ms: f64, delay_ms: f64, event: E) {
        self.pending.push(Scheduled {
            fire_at_ms: now_ms + delay_ms,
            seq: self.next_seq,
            event,
        });
        self.next_seq += 1;
    }

    /// Remove and return every event due at `now_ms`, earliest first; ties
    /// keep scheduling order.
    pub fn drain_due(&mut self, now_ms: f64) -> Vec<E> {
        let (mut due, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|s| s.fire_at_ms <= now_ms);
        self.pending = rest;
        due.sort_by(|a, b| a.fire_at_ms.total_cmp(&b.fire_at_ms).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|s| s.event).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
