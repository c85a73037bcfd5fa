//! # FlexLogic: Netlist Graph Engine
//!
//! A mutable pin/net graph for digital circuits, plus a discrete-event
//! simulator that drives gate solvers over it. Everything is addressed by
//! integer [`Label`]s into contiguous arenas; removed slots are
//! tombstoned and reused, so labels stay small and stable.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────┐
//! │          Simulation           │ ← execution loop, budgets, trace
//! │  ┌────────────────────────┐  │
//! │  │  EventQueue (min-heap)  │  │ ← (time, id) ordered signal events
//! │  └────────────────────────┘  │
//! └──────────────┬───────────────┘
//!                │ EventHandler
//! ┌──────────────▼───────────────┐
//! │            Circuit            │ ← wires → gate solvers
//! │  ┌────────┐┌────────┐┌─────┐ │
//! │  │ pins   ││ nets   ││types│ │ ← LabelArena<…>
//! │  └────────┘└────────┘└─────┘ │
//! │  PinController NetController │
//! │        GateController        │ ← editing views
//! └──────────────────────────────┘
//! ```
//!
//! Graph edits report failure with [`Label::EMPTY`] or `false` and never
//! panic on a stale label. [`FlexError`] is reserved for construction
//! edges such as [`dsl::CircuitBuilder`].

pub mod api;
pub mod arena;
pub mod circuit;
pub mod dsl;
pub mod error;
pub mod event;
pub mod label;
pub mod scheduler;
pub mod simulation;
pub mod time;
pub mod trace;

// Re-exports for convenience.
pub use api::{SimulationApi, StepResult};
pub use arena::{Emptiable, LabelArena};
pub use circuit::{
    Circuit, GateController, GateLibrary, GateType, Net, NetController, Pin, PinController,
    Solver,
};
pub use dsl::CircuitBuilder;
pub use error::{FlexError, FlexResult};
pub use event::{Event, EventId, EventIdGen};
pub use label::Label;
pub use scheduler::EventQueue;
pub use simulation::{
    EventHandler, RunSummary, Simulation, SimulationConfig, SimulationContext, StopReason,
};
pub use time::{SimTime, VirtualTime};
pub use trace::TraceEntry;
