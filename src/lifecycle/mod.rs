//! Resource lifecycle management.
//!
//! Every listener, animation handle, looped sound, and scene object a round
//! creates is recorded in a [`ResourceRegistry`]. Teardown releases all of them
//! exactly once, whether the round ended by restart, by the engine destroying
//! the scene, or by the controller being dropped.
//!
//! ## Example
//!
//! ```
//! use card_memory::host::{Animator, InputSource, PointerKind, SimHost};
//! use card_memory::lifecycle::ResourceRegistry;
//!
//! let mut host = SimHost::new();
//! let mut registry = ResourceRegistry::new();
//!
//! let listener = host.listen(PointerKind::Down);
//! registry.track_listener(listener);
//! let timer = host.schedule(1_000);
//! registry.track_animation(timer);
//!
//! let report = registry.teardown(&mut host);
//! assert_eq!(report.listeners_released, 1);
//! assert_eq!(report.animations_cancelled, 1);
//! assert!(registry.is_empty());
//!
//! // A second teardown releases nothing.
//! assert!(registry.teardown(&mut host).is_noop());
//! ```

mod registry;

pub use registry::{ResourceRegistry, TeardownReport};
