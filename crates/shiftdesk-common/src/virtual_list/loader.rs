/// Pagination bookkeeping for the flattened list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadState {
    pub known_item_count: usize,
    pub has_more_data: bool,
    pub is_fetching_more: bool,
}

/// Permission to run exactly one page fetch.
///
/// Returned by [`LoaderGate::begin`] and handed back on completion. Tickets
/// from before a [`LoaderGate::reset`] are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Outcome of asking the gate for more data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadTrigger {
    /// The caller must fetch the next page and report back with the ticket
    Started(FetchTicket),
    /// A fetch is already running; nothing to do
    InFlight,
    /// The sequence has no more pages
    Exhausted,
}

/// Decides when the list asks its data source for the next page.
///
/// At most one fetch is in flight per gate. A failed fetch only clears the
/// in-flight flag, so the next scroll near the tail tries again; there is
/// no automatic retry.
#[derive(Debug, Clone)]
pub struct LoaderGate {
    state: LoadState,
    threshold: usize,
    generation: u64,
    fetches_started: usize,
}

impl LoaderGate {
    /// `threshold` is the distance, in rows, from the end of the renderable
    /// range at which loading starts.
    pub fn new(threshold: usize) -> Self {
        Self {
            state: LoadState {
                known_item_count: 0,
                has_more_data: true,
                is_fetching_more: false,
            },
            threshold,
            generation: 0,
            fetches_started: 0,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Start over for a new bucket sequence. Any fetch still running for the
    /// previous sequence becomes stale.
    pub fn reset(&mut self, known_item_count: usize, has_more_data: bool) {
        self.generation += 1;
        self.state = LoadState {
            known_item_count,
            has_more_data,
            is_fetching_more: false,
        };
        tracing::debug!(
            generation = self.generation,
            known_item_count,
            has_more_data,
            "loader gate reset"
        );
    }

    /// Track growth of the sequence that did not come through [`LoaderGate::complete`].
    pub fn sync(&mut self, known_item_count: usize, has_more_data: bool) {
        self.state.known_item_count = known_item_count;
        self.state.has_more_data = has_more_data;
    }

    pub fn is_index_loaded(&self, index: usize) -> bool {
        !self.state.has_more_data || index < self.state.known_item_count
    }

    /// Known rows plus one slot for the loading placeholder while more data exists
    pub fn total_renderable_count(&self) -> usize {
        self.state.known_item_count + usize::from(self.state.has_more_data)
    }

    pub fn placeholder_index(&self) -> Option<usize> {
        self.state
            .has_more_data
            .then_some(self.state.known_item_count)
    }

    /// Whether rendering up to `last_rendered_index` is close enough to the
    /// tail to start a fetch.
    pub fn should_load(&self, last_rendered_index: usize) -> bool {
        self.state.has_more_data
            && !self.state.is_fetching_more
            && last_rendered_index.saturating_add(self.threshold) >= self.total_renderable_count()
    }

    pub fn begin(&mut self) -> LoadTrigger {
        if !self.state.has_more_data {
            return LoadTrigger::Exhausted;
        }
        if self.state.is_fetching_more {
            return LoadTrigger::InFlight;
        }
        self.state.is_fetching_more = true;
        self.fetches_started += 1;
        tracing::debug!(
            generation = self.generation,
            known_item_count = self.state.known_item_count,
            "loading next page"
        );
        LoadTrigger::Started(FetchTicket {
            generation: self.generation,
        })
    }

    /// Record a successful fetch. Returns `false` for a stale ticket.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        known_item_count: usize,
        has_more_data: bool,
    ) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.state = LoadState {
            known_item_count,
            has_more_data,
            is_fetching_more: false,
        };
        true
    }

    /// Record a failed fetch. The list keeps what it had. Returns `false`
    /// for a stale ticket.
    pub fn fail(&mut self, ticket: FetchTicket) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.state.is_fetching_more = false;
        true
    }

    /// Number of fetches this gate has started, across resets
    pub fn fetches_started(&self) -> usize {
        self.fetches_started
    }

    /// Whether `ticket` belongs to the current sequence
    pub fn accepts(&self, ticket: FetchTicket) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "ignoring stale page result"
            );
            return false;
        }
        true
    }
}
