//! The calling context threaded through every entity operation.

use std::any::Any ;
use std::sync::Arc ;

use crate::EntitySpecification ;



/// What the host intends to do with the entities involved in a call.
#[derive( Debug, Clone, Copy, PartialEq, Eq, Hash, Default )]
pub enum Access {
	#[default] Read,
	ReadMultiple,
	Write,
	WriteMultiple,
}

impl Access {
	#[inline] pub fn is_read( self ) -> bool { matches!( self, Self::Read | Self::ReadMultiple )}
	#[inline] pub fn is_write( self ) -> bool { matches!( self, Self::Write | Self::WriteMultiple )}
}

/// How long the host intends to hold on to results.
#[derive( Debug, Clone, Copy, PartialEq, Eq, Hash, Default )]
pub enum Retention {
	Ignored,
	#[default] Transient,
	Session,
	Permanent,
}

/// Manager-owned state attached to a [`Context`].
///
/// Created by a manager interface's `create_state`, and only ever looked into
/// by that same manager. Clones share the same state; equality is identity.
#[derive( Clone )]
pub struct ManagerState( Arc<dyn Any + Send + Sync> );

impl ManagerState {

	pub fn new<T: Any + Send + Sync>( state: T ) -> Self { Self( Arc::new( state ))}

	/// Access the state as its concrete type.
	pub fn downcast_ref<T: Any>( &self ) -> Option<&T> { self.0.downcast_ref::<T>() }

}

impl std::fmt::Debug for ManagerState {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_tuple( "ManagerState" ).field( &Arc::as_ptr( &self.0 )).finish()
	}
}

impl PartialEq for ManagerState {
	fn eq( &self, other: &Self ) -> bool { Arc::ptr_eq( &self.0, &other.0 )}
}

/// Describes the calling environment of one host request.
///
/// Built by the host and passed by reference on every call. The [`Manager`]( crate::Manager )
/// forwards it untouched.
#[derive( Debug, Clone, PartialEq, Default )]
pub struct Context {
	pub access: Access,
	pub retention: Retention,
	/// Where in the host the request originates, e.g. a UI panel or batch export.
	pub locale: Option<EntitySpecification>,
	pub manager_state: Option<ManagerState>,
}

impl Context {

	pub fn new( access: Access ) -> Self {
		Self { access, ..Self::default() }
	}

	pub fn with_retention( mut self, retention: Retention ) -> Self {
		self.retention = retention;
		self
	}

	pub fn with_locale( mut self, locale: EntitySpecification ) -> Self {
		self.locale = Some( locale );
		self
	}

	pub fn with_manager_state( mut self, state: ManagerState ) -> Self {
		self.manager_state = Some( state );
		self
	}

}

#[cfg( test )]
mod tests {

	use super::* ;

	#[test]
	fn access_modes_are_read_or_write() {
		assert!( Access::Read.is_read() && Access::ReadMultiple.is_read() );
		assert!( Access::Write.is_write() && Access::WriteMultiple.is_write() );
		assert!( !Access::Read.is_write() );
		assert!( !Access::WriteMultiple.is_read() );
	}

	#[test]
	fn builder_keeps_access() {
		let context = Context::new( Access::Write ).with_retention( Retention::Session );
		assert_eq!( context.access, Access::Write );
		assert_eq!( context.retention, Retention::Session );
		assert_eq!( context.manager_state, None );
	}

}
