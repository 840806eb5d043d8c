//! The contract an asset management back-end implements.
//!
//! A [`ManagerInterface`] is written once per asset management system and
//! exposes that system's primitive operations. Hosts never call it directly;
//! they go through a [`Manager`]( crate::Manager ), which guarantees that:
//!
//! - every batch argument is a non-empty [`Batch`],
//! - parallel batches already have equal length, except in
//! 	`get_related_references`, where one side may hold a single element,
//! - the host's [`Context`] and [`HostSession`] follow the business arguments.
//!
//! Implementations may therefore rely on these properties without checking them.

use std::collections::BTreeMap ;

use crate::{
	Batch, Context, EntityReference, EntitySpecification, HostSession, InfoDictionary,
	ManagerState, Metadata, Settings, Terminology, ThumbnailOptions, Value,
};



/// Version name → reference of that version, one per queried entity.
pub type VersionMap = BTreeMap<String, EntityReference>;

/// How a manager wishes to be involved with entities of a given specification.
///
/// A bit set; combine the constants with `|`.
#[derive( Debug, Clone, Copy, PartialEq, Eq, Hash, Default )]
pub struct ManagementPolicy( pub u32 );

impl ManagementPolicy {

	/// The manager has no interest in such entities.
	pub const IGNORED: Self = Self( 0 );
	/// The manager would like to handle such entities.
	pub const MANAGED: Self = Self( 1 );
	/// The manager must handle all such entities; the host should not offer
	/// an unmanaged alternative.
	pub const EXCLUSIVE: Self = Self( 1 << 1 );
	/// The manager tracks the path of such entities itself; the host need not
	/// supply one when writing.
	pub const WILL_MANAGE_PATH: Self = Self( 1 << 2 );

	#[inline] pub fn bits( self ) -> u32 { self.0 }
	#[inline] pub fn contains( self, other: Self ) -> bool { self.0 & other.0 == other.0 }
	#[inline] pub fn is_ignored( self ) -> bool { self.0 == 0 }
	#[inline] pub fn is_managed( self ) -> bool { self.contains( Self::MANAGED )}
	#[inline] pub fn is_exclusive( self ) -> bool { self.contains( Self::EXCLUSIVE )}

}

impl std::ops::BitOr for ManagementPolicy {
	type Output = Self;
	fn bitor( self, rhs: Self ) -> Self { Self( self.0 | rhs.0 )}
}

impl std::ops::BitOrAssign for ManagementPolicy {
	fn bitor_assign( &mut self, rhs: Self ) { self.0 |= rhs.0 }
}

/// Primitive operations of an asset management system.
///
/// Results for batch operations are positional: element `i` of the returned
/// `Vec` answers element `i` of the input batch.
///
/// Errors are the implementation's own. They reach the host unchanged, wrapped
/// only in [`ManagerError::Interface`]( crate::ManagerError::Interface ) where
/// the bridge itself may also fail.
#[allow( clippy::too_many_arguments )]
pub trait ManagerInterface {

	type Error: std::error::Error ;

	/// Reverse-DNS style identifier, e.g. `"org.example.assets"`.
	fn identifier( &self ) -> Result<String, Self::Error> ;
	fn display_name( &self ) -> Result<String, Self::Error> ;
	fn info( &self ) -> Result<InfoDictionary, Self::Error> { Ok( InfoDictionary::new() )}

	/// Rewrites host terminology in place to match the manager's vocabulary.
	fn update_terminology( &self, _terminology: &mut Terminology, _host_session: &HostSession ) -> Result<(), Self::Error> {
		Ok(())
	}

	fn get_settings( &self, host_session: &HostSession ) -> Result<Settings, Self::Error> ;
	fn set_settings( &self, settings: &Settings, host_session: &HostSession ) -> Result<(), Self::Error> ;

	/// Prepares the manager for use with the current settings.
	fn initialize( &self, host_session: &HostSession ) -> Result<(), Self::Error> ;

	/// Hints that the given entities will be queried soon.
	fn prefetch( &self, _entity_refs: &Batch<EntityReference>, _context: &Context, _host_session: &HostSession ) -> Result<(), Self::Error> {
		Ok(())
	}

	fn flush_caches( &self, _host_session: &HostSession ) -> Result<(), Self::Error> { Ok(()) }

	fn is_entity_reference( &self, tokens: &Batch<String>, context: &Context, host_session: &HostSession ) -> Result<Vec<bool>, Self::Error> ;

	fn entity_exists( &self, entity_refs: &Batch<EntityReference>, context: &Context, host_session: &HostSession ) -> Result<Vec<bool>, Self::Error> ;

	/// Resolves each reference to its primary string (usually a file path or URL).
	fn resolve_entity_reference( &self, entity_refs: &Batch<EntityReference>, context: &Context, host_session: &HostSession ) -> Result<Vec<String>, Self::Error> ;

	/// A sensible default reference for each specification, if the manager has one.
	fn default_entity_reference(
		&self,
		specifications: &Batch<EntitySpecification>,
		context: &Context,
		host_session: &HostSession,
	) -> Result<Vec<Option<EntityReference>>, Self::Error> ;

	fn entity_name( &self, entity_refs: &Batch<EntityReference>, context: &Context, host_session: &HostSession ) -> Result<Vec<String>, Self::Error> ;

	fn entity_display_name( &self, entity_refs: &Batch<EntityReference>, context: &Context, host_session: &HostSession ) -> Result<Vec<String>, Self::Error> ;

	fn get_entity_metadata( &self, entity_refs: &Batch<EntityReference>, context: &Context, host_session: &HostSession ) -> Result<Vec<Metadata>, Self::Error> ;

	/// Stores one record per reference. With `merge` the records are merged into
	/// existing metadata, otherwise they replace it.
	fn set_entity_metadata(
		&self,
		entity_refs: &Batch<EntityReference>,
		data: &Batch<Metadata>,
		context: &Context,
		host_session: &HostSession,
		merge: bool,
	) -> Result<(), Self::Error> ;

	fn get_entity_metadata_entry(
		&self,
		entity_refs: &Batch<EntityReference>,
		key: &str,
		context: &Context,
		host_session: &HostSession,
		default_value: Option<&Value>,
	) -> Result<Vec<Value>, Self::Error> ;

	fn set_entity_metadata_entry(
		&self,
		entity_refs: &Batch<EntityReference>,
		key: &str,
		value: &Value,
		context: &Context,
		host_session: &HostSession,
	) -> Result<(), Self::Error> ;

	fn entity_version_name( &self, entity_refs: &Batch<EntityReference>, context: &Context, host_session: &HostSession ) -> Result<Vec<String>, Self::Error> ;

	/// Available versions per reference. A negative `max_num_versions` is unbounded.
	fn entity_versions(
		&self,
		entity_refs: &Batch<EntityReference>,
		context: &Context,
		host_session: &HostSession,
		include_meta_versions: bool,
		max_num_versions: i64,
	) -> Result<Vec<VersionMap>, Self::Error> ;

	fn finalized_entity_version(
		&self,
		entity_refs: &Batch<EntityReference>,
		context: &Context,
		host_session: &HostSession,
		override_version_name: Option<&str>,
	) -> Result<Vec<EntityReference>, Self::Error> ;

	/// Related references for each (reference, relationship) pair.
	fn get_related_references(
		&self,
		entity_refs: &Batch<EntityReference>,
		relationship_specs: &Batch<EntitySpecification>,
		context: &Context,
		host_session: &HostSession,
		result_spec: Option<&EntitySpecification>,
	) -> Result<Vec<Vec<EntityReference>>, Self::Error> ;

	fn set_related_references(
		&self,
		entity_ref: &EntityReference,
		relationship_spec: &EntitySpecification,
		related_refs: &Batch<EntityReference>,
		context: &Context,
		host_session: &HostSession,
		append: bool,
	) -> Result<(), Self::Error> ;

	/// Whether a thumbnail should be made for an entity about to be registered.
	/// The manager may adjust `options` to the size it wants.
	fn thumbnail_specification(
		&self,
		_specification: &EntitySpecification,
		_context: &Context,
		_options: &mut ThumbnailOptions,
		_host_session: &HostSession,
	) -> Result<Option<EntitySpecification>, Self::Error> {
		Ok( None )
	}

	fn management_policy(
		&self,
		specifications: &Batch<EntitySpecification>,
		context: &Context,
		host_session: &HostSession,
		entity_ref: Option<&EntityReference>,
	) -> Result<Vec<ManagementPolicy>, Self::Error> ;

	/// Announces an upcoming registration. Returns the references to write to,
	/// which may differ from the targets.
	fn preflight(
		&self,
		target_entity_refs: &Batch<EntityReference>,
		entity_specs: &Batch<EntitySpecification>,
		context: &Context,
		host_session: &HostSession,
	) -> Result<Vec<EntityReference>, Self::Error> ;

	/// Publishes each primary string to its target. Returns the references the
	/// data now lives under, which may differ from the targets (e.g. a new version).
	fn register(
		&self,
		primary_strings: &Batch<String>,
		target_entity_refs: &Batch<EntityReference>,
		entity_specs: &Batch<EntitySpecification>,
		context: &Context,
		host_session: &HostSession,
	) -> Result<Vec<EntityReference>, Self::Error> ;

	fn create_state( &self, _host_session: &HostSession, _parent_state: Option<&ManagerState> ) -> Result<Option<ManagerState>, Self::Error> {
		Ok( None )
	}

	fn start_transaction( &self, _state: &ManagerState, _host_session: &HostSession ) -> Result<(), Self::Error> { Ok(()) }
	fn finish_transaction( &self, _state: &ManagerState, _host_session: &HostSession ) -> Result<(), Self::Error> { Ok(()) }
	fn cancel_transaction( &self, _state: &ManagerState, _host_session: &HostSession ) -> Result<(), Self::Error> { Ok(()) }

	/// Serialises `state` so it can be restored in another process.
	fn freeze_state( &self, state: &ManagerState, host_session: &HostSession ) -> Result<String, Self::Error> ;
	fn thaw_state( &self, token: &str, host_session: &HostSession ) -> Result<ManagerState, Self::Error> ;

}

#[cfg( test )]
mod tests {

	use super::* ;

	#[test]
	fn ignored_is_the_empty_set() {
		assert!( ManagementPolicy::IGNORED.is_ignored() );
		assert!( !ManagementPolicy::IGNORED.is_managed() );
		assert_eq!( ManagementPolicy::default(), ManagementPolicy::IGNORED );
	}

	#[test]
	fn flags_combine_with_bit_or() {
		let policy = ManagementPolicy::MANAGED | ManagementPolicy::EXCLUSIVE;
		assert!( policy.is_managed() );
		assert!( policy.is_exclusive() );
		assert!( !policy.is_ignored() );
		assert!( !policy.contains( ManagementPolicy::WILL_MANAGE_PATH ));
		assert_eq!( policy.bits(), 0b011 );
	}

	#[test]
	fn flags_accumulate_in_place() {
		let mut policy = ManagementPolicy::MANAGED;
		policy |= ManagementPolicy::WILL_MANAGE_PATH;
		assert!( policy.contains( ManagementPolicy::WILL_MANAGE_PATH ));
		assert!( policy.contains( ManagementPolicy::MANAGED | ManagementPolicy::WILL_MANAGE_PATH ));
		assert!( !policy.is_exclusive() );
	}

}
