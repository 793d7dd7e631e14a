pub mod codec;
pub mod digest;
pub mod geometry;
pub mod graphics;
pub mod surface;

/// Pure game rules: a starting state plus a transition function.
///
/// `step` must not touch anything but its arguments. Side effects (timers, drawing surfaces,
/// speech, I/O) belong to whoever drives the `Store`.
pub trait GameLogic {
    type State;
    type Input;

    fn initial_state(&self) -> Self::State;
    fn step(&self, state: &Self::State, input: Self::Input) -> Self::State;
}

/// Owns the single authoritative state value and applies inputs one at a time.
///
/// Every dispatch replaces the state wholesale with the value returned by `GameLogic::step`.
#[derive(Debug)]
pub struct Store<G: GameLogic> {
    game: G,
    state: G::State,
    dispatched: usize,
}

impl<G: GameLogic> Store<G> {
    pub fn new(game: G) -> Self {
        let state = game.initial_state();
        Self {
            game,
            state,
            dispatched: 0,
        }
    }

    pub fn state(&self) -> &G::State {
        &self.state
    }

    /// Number of inputs applied since construction or the last `reset`.
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    pub fn dispatch(&mut self, input: G::Input) -> &G::State {
        self.state = self.game.step(&self.state, input);
        self.dispatched += 1;
        log::trace!("store dispatch #{}", self.dispatched);
        &self.state
    }

    pub fn run<I>(&mut self, inputs: I) -> &G::State
    where
        I: IntoIterator<Item = G::Input>,
    {
        for input in inputs {
            self.dispatch(input);
        }
        &self.state
    }

    /// Drops the current state and starts over from `initial_state`.
    pub fn reset(&mut self) {
        self.state = self.game.initial_state();
        self.dispatched = 0;
    }
}
