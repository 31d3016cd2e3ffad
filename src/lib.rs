//! # desctl: controllability checking for discrete-event systems
//!
//! **`desctl`** decides whether a modular discrete-event system is
//! *controllable*, and if it is not, produces a shortest event trace showing
//! why.
//!
//! ## What is controllability?
//!
//! A model consists of finite automata synchronised over shared events.
//! **Plants** describe what the uncontrolled system can do; **specs** describe
//! what is allowed. Events are either *controllable* (a supervisor may disable
//! them) or *uncontrollable* (they happen whenever the plant allows). The model
//! is controllable if no reachable state of the synchronous product has an
//! uncontrollable event that every plant enables but some spec disables:
//! the specs never ask a supervisor to prevent something it cannot prevent.
//!
//! ## Key Features
//!
//! - **Explicit-state search**: breadth-first exploration of the synchronous
//!   product, stopping at the first violation.
//! - **Compact states**: each composite state is packed into a single `u64`
//!   using the minimal number of bits per automaton. Models that do not fit are
//!   rejected up front with [`CheckError::StateTupleSize`][crate::error::CheckError].
//! - **Shortest counterexamples**: predecessor tracking yields a minimal trace,
//!   which can be replayed with [`verify::check_counterexample`].
//! - **Pluggable traces**: counterexamples are built through a
//!   [`TraceFactory`][crate::trace::TraceFactory].
//!
//! ## Basic Usage
//!
//! ```rust
//! use desctl::checker::ControllabilityChecker;
//! use desctl::model::{Automaton, ComponentKind, EventKind, ProductDes};
//! use desctl::trace::DefaultTraceFactory;
//!
//! let mut des = ProductDes::new("buffer");
//! let put = des.add_event("put", EventKind::Uncontrollable);
//! let get = des.add_event("get", EventKind::Controllable);
//!
//! // The producer may put items at any time.
//! let mut producer = Automaton::new("producer", ComponentKind::Plant);
//! let q = producer.add_state("q", true);
//! producer.add_transition(q, put, q);
//! des.add_automaton(producer);
//!
//! // The buffer holds a single item.
//! let mut buffer = Automaton::new("buffer", ComponentKind::Spec);
//! let empty = buffer.add_state("empty", true);
//! let full = buffer.add_state("full", false);
//! buffer.add_transition(empty, put, full);
//! buffer.add_transition(full, get, empty);
//! des.add_automaton(buffer);
//!
//! let mut checker = ControllabilityChecker::new(&des, DefaultTraceFactory)?;
//! assert!(!checker.check()?);
//! let trace = checker.counterexample().unwrap();
//! assert_eq!(trace.labels(), &["put", "put"]);
//! # Ok::<(), desctl::error::CheckError>(())
//! ```
//!
//! ## Core Components
//!
//! - **[`checker`]**: the search engine and its configuration.
//! - **[`encoder`]**: bit-packing of state tuples.
//! - **[`system`]**: automaton and event ordering, alphabets and transition tables.
//! - **[`counterexample`]** and **[`verify`]**: building and replaying traces.

pub mod checker;
pub mod counterexample;
pub mod encoder;
pub mod error;
pub mod events;
pub mod model;
pub mod store;
pub mod system;
pub mod trace;
pub mod transition;
pub mod types;
pub mod verify;
