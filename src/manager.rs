//! The host-facing [`Manager`].
//!
//! A [`Manager`] owns one [`ManagerInterface`] and one [`HostSession`]. Each
//! operation normalises its batch arguments, rejects argument lists that can't
//! be paired up, appends the context and session, and only then calls into
//! the interface. Failures raised by the interface are passed back untouched.

use std::sync::Arc ;
use thiserror::Error ;
use tracing::{ debug, warn };

use crate::batch::{ Batch, Normalized, OneOrMany, ShapeError };
use crate::cardinality::{ self, Broadcast, CardinalityError, Extent };
use crate::{
	Context, EntityReference, EntitySpecification, HostSession, InfoDictionary, ManagementPolicy,
	ManagerInterface, Metadata, Settings, Terminology, ThumbnailOptions, Value, VersionMap,
};



/// Errors returned by [`Manager`] operations that validate their arguments.
///
/// `Shape` and `Cardinality` are raised before the interface is called.
/// `Interface` carries whatever the interface returned, as is.
#[derive( Error, Debug )]
pub enum ManagerError<E> {
	/// An argument could not be normalised.
	#[error( "Invalid Argument: {0}" )] Shape( #[from] ShapeError ),
	/// Parallel arguments have lengths that cannot be paired up.
	#[error( "Cardinality Error: {0}" )] Cardinality( #[from] CardinalityError ),
	/// The manager interface failed.
	#[error( transparent )] Interface( E ),
}

impl<E> ManagerError<E> {

	#[inline] pub fn is_cardinality( &self ) -> bool { matches!( self, Self::Cardinality( _ ))}

	/// The interface's own error, if that's where the failure came from.
	pub fn interface_error( &self ) -> Option<&E> {
		match self {
			Self::Interface( error ) => Some( error ),
			_ => None,
		}
	}

	pub fn into_interface_error( self ) -> Option<E> {
		match self {
			Self::Interface( error ) => Some( error ),
			_ => None,
		}
	}

}

pub type ManagerResult<T, E> = Result<T, ManagerError<E>>;

/// Options for [`Manager::entity_versions`].
#[derive( Debug, Clone, Copy, PartialEq, Eq, Hash )]
pub struct VersionQuery {
	/// Include meta-versions such as `"latest"` alongside concrete versions.
	pub include_meta_versions: bool,
	/// Upper bound on versions returned per entity. Negative means unbounded.
	pub max_num_versions: i64,
}

impl Default for VersionQuery {
	fn default() -> Self { Self { include_meta_versions: false, max_num_versions: -1 }}
}

impl VersionQuery {

	pub fn with_meta_versions( mut self, include: bool ) -> Self {
		self.include_meta_versions = include;
		self
	}

	pub fn with_max_num_versions( mut self, max: i64 ) -> Self {
		self.max_num_versions = max;
		self
	}

}

/// The host's handle on an asset management system.
///
/// Binds one [`ManagerInterface`] to one [`HostSession`] for its whole lifetime.
/// Batch arguments accept either a single value or a sequence:
///
/// ```
/// # use asset_bridge::{ EntityReference, OneOrMany };
/// fn refs( refs: impl Into<OneOrMany<EntityReference>> ) -> OneOrMany<EntityReference> { refs.into() }
/// assert!( refs( "asset://a" ).is_singular() );
/// assert!( !refs([ "asset://a", "asset://b" ]).is_singular() );
/// ```
///
/// The manager holds no state of its own between calls and performs no locking.
/// Sharing one across threads is as safe as the interface it wraps.
pub struct Manager<I> {
	interface: Arc<I>,
	host_session: HostSession,
}

impl<I: std::fmt::Debug> std::fmt::Debug for Manager<I> {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "Manager" )
			.field( "interface", &self.interface )
			.field( "host_session", &self.host_session )
			.finish()
	}
}

impl<I: ManagerInterface> Manager<I> {

	pub fn new( interface: Arc<I>, host_session: HostSession ) -> Self {
		Self { interface, host_session }
	}

	pub fn from_interface( interface: I, host_session: HostSession ) -> Self {
		Self::new( Arc::new( interface ), host_session )
	}

	#[inline] pub fn interface( &self ) -> &Arc<I> { &self.interface }
	#[inline] pub fn host_session( &self ) -> &HostSession { &self.host_session }

	fn check<T, V>( operation: &'static str, result: Result<T, V> ) -> ManagerResult<T, I::Error>
	where
		V: std::fmt::Display,
		ManagerError<I::Error>: From<V>,
	{
		result.map_err(| error | {
			warn!( operation, %error, "rejected before reaching the manager interface" );
			ManagerError::from( error )
		})
	}

	fn normalize<T>(
		operation: &'static str,
		argument: impl Into<OneOrMany<T>>,
		name: &'static str,
	) -> ManagerResult<Normalized<T>, I::Error> {
		Self::check( operation, argument.into().normalize( name ))
	}

	fn batch<T>(
		operation: &'static str,
		argument: impl Into<OneOrMany<T>>,
		name: &'static str,
	) -> ManagerResult<Batch<T>, I::Error> {
		Self::normalize( operation, argument, name ).map( Normalized::into_batch )
	}

	fn forward<T>(
		&self,
		operation: &'static str,
		call: impl FnOnce( &I, &HostSession ) -> Result<T, I::Error>,
	) -> Result<T, I::Error> {
		debug!( operation, "delegating to manager interface" );
		call( &self.interface, &self.host_session )
	}

	fn delegate<T>(
		&self,
		operation: &'static str,
		count: usize,
		call: impl FnOnce( &I, &HostSession ) -> Result<T, I::Error>,
	) -> ManagerResult<T, I::Error> {
		debug!( operation, count, "delegating to manager interface" );
		call( &self.interface, &self.host_session ).map_err( ManagerError::Interface )
	}

	// Plain forwarding, no arguments to validate.

	pub fn identifier( &self ) -> Result<String, I::Error> {
		self.forward( "identifier", | interface, _ | interface.identifier() )
	}

	pub fn display_name( &self ) -> Result<String, I::Error> {
		self.forward( "display_name", | interface, _ | interface.display_name() )
	}

	pub fn info( &self ) -> Result<InfoDictionary, I::Error> {
		self.forward( "info", | interface, _ | interface.info() )
	}

	/// Lets the manager substitute its own vocabulary into `terminology`.
	pub fn update_terminology( &self, terminology: &mut Terminology ) -> Result<(), I::Error> {
		self.forward( "update_terminology", | interface, session | interface.update_terminology( terminology, session ))
	}

	pub fn get_settings( &self ) -> Result<Settings, I::Error> {
		self.forward( "get_settings", | interface, session | interface.get_settings( session ))
	}

	pub fn set_settings( &self, settings: &Settings ) -> Result<(), I::Error> {
		self.forward( "set_settings", | interface, session | interface.set_settings( settings, session ))
	}

	pub fn initialize( &self ) -> Result<(), I::Error> {
		self.forward( "initialize", | interface, session | interface.initialize( session ))
	}

	pub fn flush_caches( &self ) -> Result<(), I::Error> {
		self.forward( "flush_caches", | interface, session | interface.flush_caches( session ))
	}

	pub fn thumbnail_specification(
		&self,
		specification: &EntitySpecification,
		context: &Context,
		options: &mut ThumbnailOptions,
	) -> Result<Option<EntitySpecification>, I::Error> {
		self.forward( "thumbnail_specification", | interface, session | {
			interface.thumbnail_specification( specification, context, options, session )
		})
	}

	// Single batch operations.

	pub fn prefetch( &self, entity_refs: impl Into<OneOrMany<EntityReference>>, context: &Context ) -> ManagerResult<(), I::Error> {
		let entity_refs = Self::batch( "prefetch", entity_refs, "entity_refs" )?;
		self.delegate( "prefetch", entity_refs.len(), | interface, session | interface.prefetch( &entity_refs, context, session ))
	}

	pub fn is_entity_reference( &self, tokens: impl Into<OneOrMany<String>>, context: &Context ) -> ManagerResult<Vec<bool>, I::Error> {
		let tokens = Self::batch( "is_entity_reference", tokens, "tokens" )?;
		self.delegate( "is_entity_reference", tokens.len(), | interface, session | interface.is_entity_reference( &tokens, context, session ))
	}

	pub fn entity_exists( &self, entity_refs: impl Into<OneOrMany<EntityReference>>, context: &Context ) -> ManagerResult<Vec<bool>, I::Error> {
		let entity_refs = Self::batch( "entity_exists", entity_refs, "entity_refs" )?;
		self.delegate( "entity_exists", entity_refs.len(), | interface, session | interface.entity_exists( &entity_refs, context, session ))
	}

	pub fn resolve_entity_reference( &self, entity_refs: impl Into<OneOrMany<EntityReference>>, context: &Context ) -> ManagerResult<Vec<String>, I::Error> {
		let entity_refs = Self::batch( "resolve_entity_reference", entity_refs, "entity_refs" )?;
		self.delegate( "resolve_entity_reference", entity_refs.len(), | interface, session | interface.resolve_entity_reference( &entity_refs, context, session ))
	}

	pub fn default_entity_reference(
		&self,
		specifications: impl Into<OneOrMany<EntitySpecification>>,
		context: &Context,
	) -> ManagerResult<Vec<Option<EntityReference>>, I::Error> {
		let specifications = Self::batch( "default_entity_reference", specifications, "specifications" )?;
		self.delegate( "default_entity_reference", specifications.len(), | interface, session | interface.default_entity_reference( &specifications, context, session ))
	}

	pub fn entity_name( &self, entity_refs: impl Into<OneOrMany<EntityReference>>, context: &Context ) -> ManagerResult<Vec<String>, I::Error> {
		let entity_refs = Self::batch( "entity_name", entity_refs, "entity_refs" )?;
		self.delegate( "entity_name", entity_refs.len(), | interface, session | interface.entity_name( &entity_refs, context, session ))
	}

	pub fn entity_display_name( &self, entity_refs: impl Into<OneOrMany<EntityReference>>, context: &Context ) -> ManagerResult<Vec<String>, I::Error> {
		let entity_refs = Self::batch( "entity_display_name", entity_refs, "entity_refs" )?;
		self.delegate( "entity_display_name", entity_refs.len(), | interface, session | interface.entity_display_name( &entity_refs, context, session ))
	}

	pub fn get_entity_metadata( &self, entity_refs: impl Into<OneOrMany<EntityReference>>, context: &Context ) -> ManagerResult<Vec<Metadata>, I::Error> {
		let entity_refs = Self::batch( "get_entity_metadata", entity_refs, "entity_refs" )?;
		self.delegate( "get_entity_metadata", entity_refs.len(), | interface, session | interface.get_entity_metadata( &entity_refs, context, session ))
	}

	/// Reads one metadata entry per reference. `default_value` is returned for
	/// entities lacking the key.
	pub fn get_entity_metadata_entry(
		&self,
		entity_refs: impl Into<OneOrMany<EntityReference>>,
		key: &str,
		context: &Context,
		default_value: Option<Value>,
	) -> ManagerResult<Vec<Value>, I::Error> {
		let entity_refs = Self::batch( "get_entity_metadata_entry", entity_refs, "entity_refs" )?;
		self.delegate( "get_entity_metadata_entry", entity_refs.len(), | interface, session | {
			interface.get_entity_metadata_entry( &entity_refs, key, context, session, default_value.as_ref() )
		})
	}

	pub fn set_entity_metadata_entry(
		&self,
		entity_refs: impl Into<OneOrMany<EntityReference>>,
		key: &str,
		value: impl Into<Value>,
		context: &Context,
	) -> ManagerResult<(), I::Error> {
		let entity_refs = Self::batch( "set_entity_metadata_entry", entity_refs, "entity_refs" )?;
		let value = value.into();
		self.delegate( "set_entity_metadata_entry", entity_refs.len(), | interface, session | {
			interface.set_entity_metadata_entry( &entity_refs, key, &value, context, session )
		})
	}

	pub fn entity_version_name( &self, entity_refs: impl Into<OneOrMany<EntityReference>>, context: &Context ) -> ManagerResult<Vec<String>, I::Error> {
		let entity_refs = Self::batch( "entity_version_name", entity_refs, "entity_refs" )?;
		self.delegate( "entity_version_name", entity_refs.len(), | interface, session | interface.entity_version_name( &entity_refs, context, session ))
	}

	pub fn entity_versions(
		&self,
		entity_refs: impl Into<OneOrMany<EntityReference>>,
		context: &Context,
		query: VersionQuery,
	) -> ManagerResult<Vec<VersionMap>, I::Error> {
		let entity_refs = Self::batch( "entity_versions", entity_refs, "entity_refs" )?;
		self.delegate( "entity_versions", entity_refs.len(), | interface, session | {
			interface.entity_versions( &entity_refs, context, session, query.include_meta_versions, query.max_num_versions )
		})
	}

	/// The reference each entity should be pinned to, e.g. resolving `"latest"`
	/// to a concrete version. `override_version_name` picks a specific version instead.
	pub fn finalized_entity_version(
		&self,
		entity_refs: impl Into<OneOrMany<EntityReference>>,
		context: &Context,
		override_version_name: Option<&str>,
	) -> ManagerResult<Vec<EntityReference>, I::Error> {
		let entity_refs = Self::batch( "finalized_entity_version", entity_refs, "entity_refs" )?;
		self.delegate( "finalized_entity_version", entity_refs.len(), | interface, session | {
			interface.finalized_entity_version( &entity_refs, context, session, override_version_name )
		})
	}

	pub fn management_policy(
		&self,
		specifications: impl Into<OneOrMany<EntitySpecification>>,
		context: &Context,
		entity_ref: Option<&EntityReference>,
	) -> ManagerResult<Vec<ManagementPolicy>, I::Error> {
		let specifications = Self::batch( "management_policy", specifications, "specifications" )?;
		self.delegate( "management_policy", specifications.len(), | interface, session | {
			interface.management_policy( &specifications, context, session, entity_ref )
		})
	}

	pub fn set_related_references(
		&self,
		entity_ref: &EntityReference,
		relationship_spec: &EntitySpecification,
		related_refs: impl Into<OneOrMany<EntityReference>>,
		context: &Context,
		append: bool,
	) -> ManagerResult<(), I::Error> {
		let related_refs = Self::batch( "set_related_references", related_refs, "related_refs" )?;
		self.delegate( "set_related_references", related_refs.len(), | interface, session | {
			interface.set_related_references( entity_ref, relationship_spec, &related_refs, context, session, append )
		})
	}

	// Paired batch operations.

	/// Queries related references, either one reference against many
	/// relationships, many references against one relationship, or pairwise.
	///
	/// Both batches are forwarded as given; a one-to-many call is not expanded.
	///
	/// # Errors
	/// [`ManagerError::Cardinality`] if both sides hold several elements but
	/// differ in length.
	pub fn get_related_references(
		&self,
		entity_refs: impl Into<OneOrMany<EntityReference>>,
		relationship_specs: impl Into<OneOrMany<EntitySpecification>>,
		context: &Context,
		result_spec: Option<&EntitySpecification>,
	) -> ManagerResult<Vec<Vec<EntityReference>>, I::Error> {

		const OPERATION: &str = "get_related_references";

		let entity_refs = Self::normalize( OPERATION, entity_refs, "entity_refs" )?;
		let relationship_specs = Self::normalize( OPERATION, relationship_specs, "relationship_specs" )?;
		let len = Self::check( OPERATION, cardinality::canonical_length( &[
			Extent::of( &entity_refs, Broadcast::IfSingleElement ),
			Extent::of( &relationship_specs, Broadcast::IfSingleElement ),
		]))?;

		let entity_refs = entity_refs.into_batch();
		let relationship_specs = relationship_specs.into_batch();
		self.delegate( OPERATION, len, | interface, session | {
			interface.get_related_references( &entity_refs, &relationship_specs, context, session, result_spec )
		})

	}

	/// Stores one metadata record per reference.
	///
	/// # Errors
	/// [`ManagerError::Cardinality`] if the number of records differs from the
	/// number of references.
	pub fn set_entity_metadata(
		&self,
		entity_refs: impl Into<OneOrMany<EntityReference>>,
		data: impl Into<OneOrMany<Metadata>>,
		context: &Context,
		merge: bool,
	) -> ManagerResult<(), I::Error> {

		const OPERATION: &str = "set_entity_metadata";

		let entity_refs = Self::normalize( OPERATION, entity_refs, "entity_refs" )?;
		let data = Self::normalize( OPERATION, data, "data" )?;
		let len = Self::check( OPERATION, cardinality::require_equal(
			Extent::of( &entity_refs, Broadcast::Never ),
			Extent::of( &data, Broadcast::Never ),
		))?;

		let entity_refs = entity_refs.into_batch();
		let data = data.into_batch();
		self.delegate( OPERATION, len, | interface, session | {
			interface.set_entity_metadata( &entity_refs, &data, context, session, merge )
		})

	}

	/// Announces an upcoming [`register`]( Self::register ).
	///
	/// # Errors
	/// [`ManagerError::Cardinality`] unless there is exactly one specification per
	/// target reference.
	pub fn preflight(
		&self,
		target_entity_refs: impl Into<OneOrMany<EntityReference>>,
		entity_specs: impl Into<OneOrMany<EntitySpecification>>,
		context: &Context,
	) -> ManagerResult<Vec<EntityReference>, I::Error> {

		const OPERATION: &str = "preflight";

		let target_entity_refs = Self::normalize( OPERATION, target_entity_refs, "target_entity_refs" )?;
		let entity_specs = Self::normalize( OPERATION, entity_specs, "entity_specs" )?;
		let len = Self::check( OPERATION, cardinality::require_equal(
			Extent::of( &target_entity_refs, Broadcast::Never ),
			Extent::of( &entity_specs, Broadcast::Never ),
		))?;

		let target_entity_refs = target_entity_refs.into_batch();
		let entity_specs = entity_specs.into_batch();
		self.delegate( OPERATION, len, | interface, session | {
			interface.preflight( &target_entity_refs, &entity_specs, context, session )
		})

	}

	/// Publishes primary strings (file paths, URLs...) to target references.
	///
	/// Any argument given in singular form is repeated to match the others.
	/// Returns the references the manager registered under, which may differ
	/// from the targets.
	///
	/// # Errors
	/// [`ManagerError::Cardinality`] if two sequence arguments differ in length.
	pub fn register(
		&self,
		primary_strings: impl Into<OneOrMany<String>>,
		target_entity_refs: impl Into<OneOrMany<EntityReference>>,
		entity_specs: impl Into<OneOrMany<EntitySpecification>>,
		context: &Context,
	) -> ManagerResult<Vec<EntityReference>, I::Error> {
		self.register_with_metadata( primary_strings, target_entity_refs, entity_specs, context, Vec::new() )
	}

	/// [`register`]( Self::register ), then attaches `metadata` to the references
	/// the manager returned.
	///
	/// Metadata goes onto the post-registration references, since registration
	/// may assign new ones. If registration fails, no metadata is written. An
	/// empty `metadata` skips the second call entirely.
	///
	/// # Errors
	/// [`ManagerError::Cardinality`] if two sequence arguments differ in length,
	/// or `metadata` is non-empty and doesn't hold one record per registration.
	/// Both are raised before anything is registered.
	pub fn register_with_metadata(
		&self,
		primary_strings: impl Into<OneOrMany<String>>,
		target_entity_refs: impl Into<OneOrMany<EntityReference>>,
		entity_specs: impl Into<OneOrMany<EntitySpecification>>,
		context: &Context,
		metadata: Vec<Metadata>,
	) -> ManagerResult<Vec<EntityReference>, I::Error> {

		const OPERATION: &str = "register";

		let primary_strings = Self::normalize( OPERATION, primary_strings, "primary_strings" )?;
		let target_entity_refs = Self::normalize( OPERATION, target_entity_refs, "target_entity_refs" )?;
		let entity_specs = Self::normalize( OPERATION, entity_specs, "entity_specs" )?;
		let len = Self::check( OPERATION, cardinality::canonical_length( &[
			Extent::of( &primary_strings, Broadcast::IfSingular ),
			Extent::of( &target_entity_refs, Broadcast::IfSingular ),
			Extent::of( &entity_specs, Broadcast::IfSingular ),
		]))?;

		let metadata = match Batch::try_from_vec( metadata ) {
			None => None,
			Some( records ) => {
				Self::check( OPERATION, cardinality::require_equal(
					Extent::new( "target_entity_refs", len, false ),
					Extent::new( "metadata", records.len(), false ),
				))?;
				Some( records )
			}
		};

		let primary_strings = Self::check( OPERATION, cardinality::broadcast( primary_strings, len ))?;
		let target_entity_refs = Self::check( OPERATION, cardinality::broadcast( target_entity_refs, len ))?;
		let entity_specs = Self::check( OPERATION, cardinality::broadcast( entity_specs, len ))?;

		let registered = self.delegate( OPERATION, len, | interface, session | {
			interface.register( &primary_strings, &target_entity_refs, &entity_specs, context, session )
		})?;

		let Some( metadata ) = metadata else { return Ok( registered ) };
		self.attach_registered_metadata( registered, &metadata, context )

	}

	fn attach_registered_metadata(
		&self,
		registered: Vec<EntityReference>,
		metadata: &Batch<Metadata>,
		context: &Context,
	) -> ManagerResult<Vec<EntityReference>, I::Error> {

		// The interface is trusted to return one reference per registration,
		// but the metadata call still must not see a mismatched pair.
		let returned = registered.len();
		let registered = Self::check( "register", Batch::try_from_vec( registered ).ok_or( CardinalityError::ExactMismatch {
			left: "registered_refs",
			left_len: 0,
			right: "metadata",
			right_len: metadata.len(),
		}))?;
		Self::check( "register", cardinality::require_equal(
			Extent::new( "registered_refs", returned, false ),
			Extent::new( "metadata", metadata.len(), false ),
		))?;

		self.delegate( "set_entity_metadata", returned, | interface, session | {
			interface.set_entity_metadata( &registered, metadata, context, session, true )
		})?;
		Ok( registered.into_vec() )

	}

	// Context lifecycle.

	/// Creates a context carrying fresh manager state. A child context inherits
	/// access, retention and locale from `parent`.
	pub fn create_context( &self, parent: Option<&Context> ) -> Result<Context, I::Error> {
		let parent_state = parent.and_then(| parent | parent.manager_state.as_ref() );
		let manager_state = self.forward( "create_state", | interface, session | interface.create_state( session, parent_state ))?;
		Ok( match parent {
			Some( parent ) => Context {
				access: parent.access,
				retention: parent.retention,
				locale: parent.locale.clone(),
				manager_state,
			},
			None => Context { manager_state, ..Context::default() },
		})
	}

	/// Starts a transaction on the context's manager state. Contexts without
	/// manager state have nothing to transact on.
	pub fn start_transaction( &self, context: &Context ) -> Result<(), I::Error> {
		match &context.manager_state {
			Some( state ) => self.forward( "start_transaction", | interface, session | interface.start_transaction( state, session )),
			None => Ok(()),
		}
	}

	pub fn finish_transaction( &self, context: &Context ) -> Result<(), I::Error> {
		match &context.manager_state {
			Some( state ) => self.forward( "finish_transaction", | interface, session | interface.finish_transaction( state, session )),
			None => Ok(()),
		}
	}

	pub fn cancel_transaction( &self, context: &Context ) -> Result<(), I::Error> {
		match &context.manager_state {
			Some( state ) => self.forward( "cancel_transaction", | interface, session | interface.cancel_transaction( state, session )),
			None => Ok(()),
		}
	}

	/// Serialises the context's manager state, `None` if it has none.
	pub fn freeze_context( &self, context: &Context ) -> Result<Option<String>, I::Error> {
		context.manager_state.as_ref()
			.map(| state | self.forward( "freeze_state", | interface, session | interface.freeze_state( state, session )))
			.transpose()
	}

	/// Restores a context from a token produced by [`freeze_context`]( Self::freeze_context ).
	/// Only manager state is restored; access and retention take their defaults.
	pub fn thaw_context( &self, token: &str ) -> Result<Context, I::Error> {
		let state = self.forward( "thaw_state", | interface, session | interface.thaw_state( token, session ))?;
		Ok( Context::default().with_manager_state( state ))
	}

}
