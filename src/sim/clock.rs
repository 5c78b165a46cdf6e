/// Interval clock for one pass over the charging horizon.
///
/// Hands out interval indices `0..total` in order. A clock can be halted
/// early, after which it yields nothing more.
///
/// # Examples
///
/// ```
/// use ev_charge_sim::sim::clock::Clock;
///
/// let mut clock = Clock::new(5);
/// let mut seen = Vec::new();
/// while let Some(k) = clock.tick() {
///     seen.push(k);
///     if k == 2 {
///         clock.halt();
///     }
/// }
/// assert_eq!(seen, vec![0, 1, 2]);
/// assert_eq!(clock.elapsed(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Clock {
    /// Next interval to hand out
    current: usize,
    /// Horizon length
    total: usize,
    halted: bool,
}

impl Clock {
    /// Creates a clock over `total` intervals.
    pub fn new(total: usize) -> Self {
        Self {
            current: 0,
            total,
            halted: false,
        }
    }

    /// Advances by one interval.
    ///
    /// # Returns
    ///
    /// * `Some(k)` - The interval to process next
    /// * `None` - If the horizon is exhausted or the clock was halted
    pub fn tick(&mut self) -> Option<usize> {
        if !self.halted && self.current < self.total {
            let step = self.current;
            self.current += 1;
            Some(step)
        } else {
            None
        }
    }

    /// Stops the clock; later ticks return `None`.
    pub fn halt(&mut self) {
        self.halted = true;
    }

    /// Number of intervals handed out so far.
    pub fn elapsed(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Returns `true` once no further interval will be handed out.
    pub fn is_finished(&self) -> bool {
        self.halted || self.current >= self.total
    }
}
