//SPDX-License-Identifier: MIT OR Apache-2.0
/*!
# levelgate

levelgate hands out immutable logger handles, one per (name, level) pair, and makes sure the
expensive parts of a log call only run when the record will actually be emitted.

# The problem

A log call usually looks cheap and often isn't. The arguments get formatted, sometimes computed,
before anybody has asked whether the level is enabled. The usual fix is a guard
(`if logger.is_enabled() { ... }`) at every call site, which nobody writes consistently.

At the same time, asking for a logger should be cheap enough to do anywhere, including in hot
paths and from many threads at once.

# The design

* A [Registry] interns handles. The first request for a (name, level) pair creates the [Logger]
  and binds its backend writer; every later request returns the same handle. Nothing is ever
  evicted.
* A [Logger] never changes. [Logger::at_level] (and `at_trace` through `at_error`) returns the
  handle for another level, going back through the registry, or the very same handle when the
  level does not change.
* Arguments are tagged: [Arg::Value] for values that already exist, [Arg::Deferred] for
  [Supplier]s. When any argument is deferred, the handle asks the backend whether its level is
  enabled before running anything. Suppliers then run exactly once each, left to right.
* Backends sit behind a narrow capability: [Backend] resolves a [Writer] per name; a writer
  answers enablement queries and writes records. The core translates its own [Level]s through a
  [LevelMap] configured with the registry.

# The API

```rust
use levelgate::Arg;

let logger = levelgate::instance!();
logger.log("service starting");

let debug = logger.at_debug();
let snapshot = || expensive_dump();
debug.log_args("state: {}", &[Arg::lazy(&snapshot)]);

# fn expensive_dump() -> String { String::new() }
```

[`instance!`] uses a process-wide registry that forwards to the [`log`] facade through
[LogBackend]. Tests and embedders that want isolation build their own [Registry], typically over
an [InMemoryBackend]. [StdErrBackend] is a dependency-free reference backend that prints one line
per record, with its threshold read from the `LEVELGATE_LEVEL` environment variable.

# Multithreading

Handles are `Send + Sync` and cheap to clone. Registries take a read lock for lookups and only
serialize the first creation of each handle.
*/

mod arg;
mod backend;
pub mod global;
mod inmemory_backend;
mod level;
mod level_map;
mod log_backend;
mod log_record;
mod logger;
mod macros;
mod registry;
mod stderr_backend;

pub use arg::{Arg, Forced, Supplier};
pub use backend::{Backend, BackendError, Message, Writer, render_error_chain};
pub use global::{GlobalLogger, LoggerName, global_registry};
pub use inmemory_backend::InMemoryBackend;
pub use level::{Level, ParseLevelError};
pub use level_map::LevelMap;
pub use log_backend::LogBackend;
pub use log_record::LogRecord;
pub use logger::Logger;
pub use registry::{BackendLevel, Registry};
pub use stderr_backend::{LEVEL_ENV, StdErrBackend};
