//! Scalar values and the string-keyed maps built from them.
//!
//! Metadata records, manager settings and info dictionaries all share one
//! primitive value type. None of these are interpreted by the [`Manager`]( crate::Manager ),
//! they only travel between the host and the manager interface.

use std::collections::BTreeMap ;
use serde::{ Deserialize, Serialize };



/// A primitive scalar stored in metadata records, settings and info dictionaries.
///
/// Serialises untagged, so `{ "frames": 24, "name": "plate" }` in JSON maps
/// directly onto a [`Metadata`] record.
#[derive( Debug, Clone, PartialEq, Serialize, Deserialize )]
#[serde( untagged )]
pub enum Value {
	Bool( bool ),
	Int( i64 ),
	Float( f64 ),
	String( String ),
}

impl Value {
	#[inline] pub fn as_str( &self ) -> Option<&str> { match self { Self::String( s ) => Some( s ), _ => None }}
	#[inline] pub fn as_int( &self ) -> Option<i64> { match self { Self::Int( i ) => Some( *i ), _ => None }}
	#[inline] pub fn as_float( &self ) -> Option<f64> { match self { Self::Float( f ) => Some( *f ), _ => None }}
	#[inline] pub fn as_bool( &self ) -> Option<bool> { match self { Self::Bool( b ) => Some( *b ), _ => None }}
}

impl std::fmt::Display for Value {
	fn fmt( &self, f: &mut std::fmt::Formatter ) -> std::fmt::Result {
		match self {
			Self::Bool( b ) => write!( f, "{}", b ),
			Self::Int( i ) => write!( f, "{}", i ),
			Self::Float( x ) => write!( f, "{}", x ),
			Self::String( s ) => write!( f, "{}", s ),
		}
	}
}

impl From<bool> for Value { fn from( value: bool ) -> Self { Self::Bool( value )}}
impl From<i32> for Value { fn from( value: i32 ) -> Self { Self::Int( i64::from( value ))}}
impl From<i64> for Value { fn from( value: i64 ) -> Self { Self::Int( value )}}
impl From<f64> for Value { fn from( value: f64 ) -> Self { Self::Float( value )}}
impl From<&str> for Value { fn from( value: &str ) -> Self { Self::String( value.to_string() )}}
impl From<String> for Value { fn from( value: String ) -> Self { Self::String( value )}}

/// A single entity's metadata, keyed by entry name.
pub type Metadata = BTreeMap<String, Value>;

/// Manager settings as returned by `get_settings` and accepted by `set_settings`.
pub type Settings = BTreeMap<String, Value>;

/// Free-form descriptive information about a manager or host.
pub type InfoDictionary = BTreeMap<String, Value>;

/// Host terminology, e.g. `"asset"` → `"product"`, that a manager may rewrite.
pub type Terminology = BTreeMap<String, String>;

/// Requested thumbnail parameters (width, height, ...), updated in place by the manager.
pub type ThumbnailOptions = BTreeMap<String, Value>;

/// Builds a [`Metadata`] record from key/value pairs.
///
/// ```
/// use asset_bridge::{ metadata, Value };
///
/// let record = metadata([( "frames", Value::from( 24 )), ( "name", "plate".into() )]);
/// assert_eq!( record.get( "frames" ), Some( &Value::Int( 24 )));
/// ```
pub fn metadata<K: Into<String>>( entries: impl IntoIterator<Item = ( K, Value )> ) -> Metadata {
	entries.into_iter().map(|( key, value )| ( key.into(), value )).collect()
}

#[cfg( test )]
mod tests {

	use super::* ;

	#[test]
	fn json_scalars_pick_the_narrowest_variant() {
		let record: Metadata = serde_json::from_str( r#"{ "approved": true, "frames": 24, "fps": 23.976, "name": "plate" }"# ).unwrap();
		assert_eq!( record.get( "approved" ), Some( &Value::Bool( true )));
		assert_eq!( record.get( "frames" ), Some( &Value::Int( 24 )));
		assert_eq!( record.get( "fps" ), Some( &Value::Float( 23.976 )));
		assert_eq!( record.get( "name" ).and_then( Value::as_str ), Some( "plate" ));
	}

	#[test]
	fn settings_serialise_without_tags() {
		let settings = metadata([( "cache_size", Value::from( 64 )), ( "root", Value::from( "/mnt/assets" ))]);
		assert_eq!( serde_json::to_string( &settings ).unwrap(), r#"{"cache_size":64,"root":"/mnt/assets"}"# );
	}

	#[test]
	fn records_iterate_in_key_order() {
		let record = metadata([( "name", Value::from( "plate" )), ( "frames", Value::from( 24 )), ( "approved", Value::from( true ))]);
		assert_eq!( record.keys().map( String::as_str ).collect::<Vec<_>>(), vec![ "approved", "frames", "name" ]);
	}

}
