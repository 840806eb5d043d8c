//! Entity payload types.
//!
//! An [`EntityReference`] is an opaque token a manager hands out for one of its
//! entities. An [`EntitySpecification`] describes the traits of an entity a host
//! is asking about. Neither is inspected on the way through.

use std::collections::BTreeMap ;
use serde::{ Deserialize, Serialize };

use crate::Value ;



/// Opaque string identifying an entity within a manager.
#[derive( Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize )]
#[serde( transparent )]
pub struct EntityReference( String );

impl EntityReference {
	#[inline] pub fn new( reference: impl Into<String> ) -> Self { Self( reference.into() )}
	#[inline] pub fn as_str( &self ) -> &str { &self.0 }
	#[inline] pub fn into_string( self ) -> String { self.0 }
}

impl std::fmt::Display for EntityReference {
	fn fmt( &self, f: &mut std::fmt::Formatter ) -> std::fmt::Result { f.write_str( &self.0 )}
}

impl AsRef<str> for EntityReference {
	fn as_ref( &self ) -> &str { &self.0 }
}

impl From<&str> for EntityReference { fn from( reference: &str ) -> Self { Self::new( reference )}}
impl From<String> for EntityReference { fn from( reference: String ) -> Self { Self( reference )}}
impl From<&String> for EntityReference { fn from( reference: &String ) -> Self { Self( reference.clone() )}}

impl PartialEq<str> for EntityReference {
	fn eq( &self, other: &str ) -> bool { self.0 == other }
}
impl PartialEq<&str> for EntityReference {
	fn eq( &self, other: &&str ) -> bool { self.0 == *other }
}

/// Describes the traits of an entity for queries, registration and relationships.
///
/// The schema names the kind of specification (e.g. `"core.entity.file"`), the
/// data carries its properties.
#[derive( Debug, Clone, PartialEq, Default, Serialize, Deserialize )]
pub struct EntitySpecification {
	schema: String,
	#[serde( default )]
	data: BTreeMap<String, Value>,
}

impl EntitySpecification {

	pub fn new( schema: impl Into<String> ) -> Self {
		Self { schema: schema.into(), data: BTreeMap::new() }
	}

	/// Adds or replaces a property.
	pub fn with( mut self, key: impl Into<String>, value: impl Into<Value> ) -> Self {
		self.data.insert( key.into(), value.into() );
		self
	}

	#[inline] pub fn schema( &self ) -> &str { &self.schema }
	#[inline] pub fn data( &self ) -> &BTreeMap<String, Value> { &self.data }
	#[inline] pub fn get( &self, key: &str ) -> Option<&Value> { self.data.get( key )}

	/// Splits a `prefix:type` schema into its components. Schemas without
	/// a type yield an empty type.
	pub fn schema_components( &self ) -> ( &str, &str ) {
		self.schema.split_once( ':' ).unwrap_or(( self.schema.as_str(), "" ))
	}

}

#[cfg( test )]
mod tests {

	use super::* ;

	#[test]
	fn schema_splits_on_first_colon() {
		let spec = EntitySpecification::new( "core.relationship:renders:latest" );
		assert_eq!( spec.schema_components(), ( "core.relationship", "renders:latest" ));
		assert_eq!( EntitySpecification::new( "core.entity.file" ).schema_components(), ( "core.entity.file", "" ));
	}

	#[test]
	fn reference_serialises_as_plain_string() {
		let entity_ref = EntityReference::from( "asset://shot/010" );
		assert_eq!( serde_json::to_string( &entity_ref ).unwrap(), r#""asset://shot/010""# );
		assert_eq!( entity_ref, "asset://shot/010" );
	}

}
