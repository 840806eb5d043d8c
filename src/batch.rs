//! Singular-or-sequence arguments and their canonical non-empty form.
//!
//! Most manager operations work on many entities at once, but hosts frequently
//! only have one to hand. Operations therefore accept a [`OneOrMany`], which is
//! normalised into a [`Batch`] before anything else happens. Normalisation
//! remembers whether the argument arrived in singular form, since only
//! singular arguments are candidates for broadcasting (see [`crate::cardinality`]).

use std::ops::Deref ;
use pipe_trait::Pipe ;
use thiserror::Error ;

use crate::{ EntityReference, EntitySpecification, Metadata };



/// An argument supplied either as a single value or as an ordered sequence.
///
/// Conversions exist for the shapes hosts naturally have: a lone value, a `Vec`,
/// a slice or an array. Borrowed sequences are copied, the caller's sequence is
/// never handed to the manager interface.
#[derive( Debug, Clone, PartialEq )]
pub enum OneOrMany<T> {
	One( T ),
	Many( Vec<T> ),
}

impl<T> OneOrMany<T> {

	/// Whether the argument was supplied in singular form.
	#[inline] pub fn is_singular( &self ) -> bool { matches!( self, Self::One( _ ))}

	/// Converts into a non-empty batch, wrapping singular values.
	///
	/// # Errors
	/// Returns [`ShapeError::Empty`] for an empty sequence.
	pub fn normalize( self, name: &'static str ) -> Result<Normalized<T>, ShapeError> {
		match self {
			Self::One( value ) => Ok( Normalized { name, batch: Batch::one( value ), singular: true }),
			Self::Many( values ) => values
				.pipe( Batch::try_from_vec )
				.map(| batch | Normalized { name, batch, singular: false })
				.ok_or( ShapeError::Empty( name )),
		}
	}

}

impl<T> From<Vec<T>> for OneOrMany<T> {
	fn from( values: Vec<T> ) -> Self { Self::Many( values )}
}
impl<T: Clone> From<&Vec<T>> for OneOrMany<T> {
	fn from( values: &Vec<T> ) -> Self { Self::Many( values.clone() )}
}
impl<T: Clone> From<&[T]> for OneOrMany<T> {
	fn from( values: &[T] ) -> Self { Self::Many( values.to_vec() )}
}
impl<T, const N: usize> From<[T; N]> for OneOrMany<T> {
	fn from( values: [T; N] ) -> Self { Self::Many( Vec::from( values ))}
}
impl<T> From<Batch<T>> for OneOrMany<T> {
	fn from( batch: Batch<T> ) -> Self { Self::Many( batch.0 )}
}

impl From<EntityReference> for OneOrMany<EntityReference> {
	fn from( reference: EntityReference ) -> Self { Self::One( reference )}
}
impl From<&EntityReference> for OneOrMany<EntityReference> {
	fn from( reference: &EntityReference ) -> Self { Self::One( reference.clone() )}
}
impl From<&str> for OneOrMany<EntityReference> {
	fn from( reference: &str ) -> Self { Self::One( reference.into() )}
}
impl From<String> for OneOrMany<EntityReference> {
	fn from( reference: String ) -> Self { Self::One( reference.into() )}
}
impl From<Vec<&str>> for OneOrMany<EntityReference> {
	fn from( references: Vec<&str> ) -> Self { Self::Many( references.into_iter().map( EntityReference::from ).collect() )}
}
impl<const N: usize> From<[&str; N]> for OneOrMany<EntityReference> {
	fn from( references: [&str; N] ) -> Self { Self::Many( references.into_iter().map( EntityReference::from ).collect() )}
}

impl From<EntitySpecification> for OneOrMany<EntitySpecification> {
	fn from( specification: EntitySpecification ) -> Self { Self::One( specification )}
}
impl From<&EntitySpecification> for OneOrMany<EntitySpecification> {
	fn from( specification: &EntitySpecification ) -> Self { Self::One( specification.clone() )}
}

impl From<&str> for OneOrMany<String> {
	fn from( value: &str ) -> Self { Self::One( value.to_string() )}
}
impl From<String> for OneOrMany<String> {
	fn from( value: String ) -> Self { Self::One( value )}
}
impl From<Vec<&str>> for OneOrMany<String> {
	fn from( values: Vec<&str> ) -> Self { Self::Many( values.into_iter().map( str::to_string ).collect() )}
}
impl<const N: usize> From<[&str; N]> for OneOrMany<String> {
	fn from( values: [&str; N] ) -> Self { Self::Many( values.into_iter().map( str::to_string ).collect() )}
}

impl From<Metadata> for OneOrMany<Metadata> {
	fn from( record: Metadata ) -> Self { Self::One( record )}
}

/// Raised when an argument cannot be brought into canonical form.
#[derive( Debug, Clone, PartialEq, Eq, Error )]
pub enum ShapeError {
	/// A sequence argument was supplied with no elements.
	#[error( "Argument `{0}` must contain at least one element" )] Empty( &'static str ),
}

/// A non-empty ordered sequence, the canonical form of every batch argument
/// handed to a [`ManagerInterface`]( crate::ManagerInterface ).
#[derive( Debug, Clone, PartialEq )]
pub struct Batch<T>( Vec<T> );

impl<T> Batch<T> {

	#[inline] pub fn one( value: T ) -> Self { Self( vec![ value ])}

	/// Returns `None` if `values` is empty.
	pub fn try_from_vec( values: Vec<T> ) -> Option<Self> {
		match values.is_empty() {
			true => None,
			false => Some( Self( values )),
		}
	}

	#[inline] pub fn as_slice( &self ) -> &[T] { &self.0 }
	#[inline] pub fn into_vec( self ) -> Vec<T> { self.0 }

}

impl<T> Deref for Batch<T> {
	type Target = [T];
	fn deref( &self ) -> &[T] { &self.0 }
}

impl<T> IntoIterator for Batch<T> {
	type Item = T;
	type IntoIter = std::vec::IntoIter<T>;
	fn into_iter( self ) -> Self::IntoIter { self.0.into_iter() }
}

impl<'a, T> IntoIterator for &'a Batch<T> {
	type Item = &'a T;
	type IntoIter = std::slice::Iter<'a, T>;
	fn into_iter( self ) -> Self::IntoIter { self.0.iter() }
}

impl<T: PartialEq> PartialEq<Vec<T>> for Batch<T> {
	fn eq( &self, other: &Vec<T> ) -> bool { &self.0 == other }
}

/// A normalised argument, tagged with its name and original shape.
#[derive( Debug, Clone )]
pub struct Normalized<T> {
	pub(crate) name: &'static str,
	pub(crate) batch: Batch<T>,
	pub(crate) singular: bool,
}

impl<T> Normalized<T> {
	#[inline] pub fn name( &self ) -> &'static str { self.name }
	#[inline] pub fn len( &self ) -> usize { self.batch.len() }
	#[inline] pub fn is_singular( &self ) -> bool { self.singular }
	#[inline] pub fn batch( &self ) -> &Batch<T> { &self.batch }
	#[inline] pub fn into_batch( self ) -> Batch<T> { self.batch }
}



#[cfg( test )]
mod tests {

	use super::* ;

	#[test]
	fn singular_value_wraps_into_one_element_batch() {
		let normalized = OneOrMany::<EntityReference>::from( "asset://a" ).normalize( "entity_refs" ).unwrap();
		assert!( normalized.is_singular() );
		assert_eq!( normalized.batch(), &vec![ EntityReference::from( "asset://a" )]);
	}

	#[test]
	fn one_element_sequence_is_not_singular() {
		let normalized = OneOrMany::<EntityReference>::from( vec![ "asset://a" ]).normalize( "entity_refs" ).unwrap();
		assert!( !normalized.is_singular() );
		assert_eq!( normalized.len(), 1 );
	}

	#[test]
	fn sequence_order_is_preserved() {
		let normalized = OneOrMany::<String>::from([ "c", "a", "b" ]).normalize( "primary_strings" ).unwrap();
		assert_eq!( normalized.into_batch().into_vec(), vec![ "c".to_string(), "a".to_string(), "b".to_string() ]);
	}

	#[test]
	fn empty_sequence_is_rejected() {
		match OneOrMany::from( Vec::<EntityReference>::new() ).normalize( "entity_refs" ) {
			Err( ShapeError::Empty( "entity_refs" )) => {}
			value => panic!( "Expected ShapeError::Empty, found: {:?}", value ),
		}
	}

	#[test]
	fn borrowed_sequence_is_copied() {
		let refs = vec![ EntityReference::from( "a" ), EntityReference::from( "b" )];
		let normalized = OneOrMany::from( refs.as_slice() ).normalize( "entity_refs" ).unwrap();
		assert_eq!( normalized.batch().as_slice(), refs.as_slice() );
		assert_ne!( normalized.batch().as_ptr(), refs.as_ptr() );
	}

	#[test]
	fn batch_exposes_slice_accessors() {
		let batch = Batch::try_from_vec( vec![ 1, 2 ]).unwrap();
		assert_eq!( batch.first(), Some( &1 ));
		assert_eq!( batch.last(), Some( &2 ));
		assert!( Batch::<i32>::try_from_vec( Vec::new() ).is_none() );
	}

}
