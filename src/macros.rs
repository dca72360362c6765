// SPDX-License-Identifier: MIT OR Apache-2.0

//! Entry-point macros.

/// Obtains a handle from the process-wide registry.
///
/// The name defaults to the module the macro is invoked from. See [crate::global] for the
/// resolution rules.
///
/// ```
/// mod billing {
///     pub fn logger() -> levelgate::GlobalLogger {
///         levelgate::instance!()
///     }
/// }
///
/// assert!(billing::logger().name().ends_with("billing"));
/// assert_eq!(levelgate::instance!("   ").name(), "   ");
///
/// let shard = 3;
/// let name = format!("worker.{shard}");
/// assert_eq!(levelgate::instance!(&name).name(), "worker.3");
/// assert!(levelgate::instance!(type String).name().ends_with("String"));
/// ```
#[macro_export]
macro_rules! instance {
    () => {
        $crate::global::instance(::core::option::Option::None, ::core::module_path!())
    };
    (type $t:ty) => {
        $crate::global::instance_for::<$t>()
    };
    ($name:expr) => {
        $crate::global::instance(
            $crate::global::LoggerName::logger_name(&$name),
            ::core::module_path!(),
        )
    };
}
