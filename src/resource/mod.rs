/*!
 * Unique Resources
 *
 * A resource value paired with the releaser that must run on it.
 *
 * ## Guarantees
 *
 * - The releaser runs at most once per acquired value, across resets and transfers
 * - An armed value is released exactly once: by `reset`, `reset_with`, or drop
 * - A failed construction or reassignment never leaks what it already acquired
 *
 * ## Construction
 *
 * - `new` / `from_parts`: from owned parts, cannot fail
 * - `try_new`: from copies; a failed releaser copy releases the stored resource
 * - `checked` / `make_checked`: armed only when the value differs from a sentinel
 */

mod checked;
mod transfer;
mod unique;

pub use checked::make_checked;
pub use unique::UniqueResource;
