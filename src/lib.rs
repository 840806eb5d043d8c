//! The host-side bridge to a pluggable asset management system.
//!
//! A host application (a compositor, a DCC tool, a pipeline script) never
//! talks to an asset management back-end directly. It holds a [`Manager`],
//! which wraps the back-end's [`ManagerInterface`] together with the host's
//! [`HostSession`], and every request goes through it.
//!
//! # Core Concepts
//!
//! - [`ManagerInterface`]: The primitive operations an asset management system
//! 	implements: resolving references, reading and writing metadata, versions,
//! 	relationships, registration. One implementation per back-end.
//!
//! - [`Manager`]: What the host calls. It normalises arguments, checks that
//! 	parallel arguments line up, appends the [`Context`] and [`HostSession`], and
//! 	builds composite operations such as registering with metadata.
//!
//! - [`OneOrMany`] / [`Batch`]: Every entity operation works on batches. Hosts may
//! 	pass a single value or a sequence; the manager interface always receives
//! 	a non-empty [`Batch`].
//!
//! - [`Context`]: Describes the calling environment (read or write, how long results
//! 	are kept, where in the host the call originates). Opaque to the bridge.
//!
//! - [`HostSession`]: Per-session services for the manager interface: the [`Host`]
//! 	it serves and a logger.
//!
//! # Argument Pairing
//!
//! Operations that take several batches pair them positionally. Depending on the
//! operation, a single-element argument may stand in for all positions:
//!
//! - `register`: any argument given in singular form is repeated to the length of
//! 	the others. Two sequences of different lengths are rejected.
//! - `get_related_references`: one reference against many relationships, many
//! 	against one, or equal lengths. Forwarded as given.
//! - `preflight`, `set_entity_metadata`: lengths must match exactly.
//!
//! Rejected calls fail with [`ManagerError::Cardinality`] and never reach the
//! manager interface.
//!
//! ```
//! use asset_bridge::{ EntityReference, EntitySpecification, OneOrMany };
//! use asset_bridge::cardinality::{ self, Broadcast, Extent };
//!
//! let refs = OneOrMany::<EntityReference>::from( "asset://shot/010" ).normalize( "entity_refs" )?;
//! let specs = OneOrMany::from( vec![
//! 	EntitySpecification::new( "core.relationship:shots" ),
//! 	EntitySpecification::new( "core.relationship:renders" ),
//! ]).normalize( "relationship_specs" )?;
//!
//! let len = cardinality::canonical_length( &[
//! 	Extent::of( &refs, Broadcast::IfSingular ),
//! 	Extent::of( &specs, Broadcast::IfSingular ),
//! ])?;
//! assert_eq!( len, 2 );
//! assert_eq!( cardinality::broadcast( refs, len )?.len(), 2 );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Errors
//!
//! Whatever a manager interface returns is handed back to the host unchanged,
//! inside [`ManagerError::Interface`] for operations the bridge validates, or
//! directly for plain forwarding such as [`Manager::get_settings`].
//!
//! # Threading
//!
//! The bridge is synchronous and keeps no state between calls. It adds no
//! locking; concurrent use is exactly as safe as the wrapped interface.

mod batch ;
pub mod cardinality ;
mod context ;
mod entity ;
mod host ;
mod manager ;
mod manager_interface ;
mod value ;

pub use batch::{ Batch, Normalized, OneOrMany, ShapeError };
pub use cardinality::CardinalityError ;
pub use context::{ Access, Context, ManagerState, Retention };
pub use entity::{ EntityReference, EntitySpecification };
pub use host::{ Host, HostInterface, HostSession, LoggerInterface, Severity, TracingLogger };
pub use manager::{ Manager, ManagerError, ManagerResult, VersionQuery };
pub use manager_interface::{ ManagementPolicy, ManagerInterface, VersionMap };
pub use value::{ metadata, InfoDictionary, Metadata, Settings, Terminology, ThumbnailOptions, Value };
