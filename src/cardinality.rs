//! Length agreement between parallel batch arguments.
//!
//! Several operations take two or more batches that pair up positionally, for
//! example target references and specifications in `register`. Before such a
//! call reaches the manager interface, every participating batch is brought to
//! one canonical length:
//!
//! - Arguments that may not broadcast must all share the same length. Two such
//! 	arguments of different lengths are always an error, never stretched.
//! - Broadcastable arguments (see [`Broadcast`]) have a single element and are
//! 	replicated up to the canonical length.
//! - With no fixed-length argument present, the canonical length is one.
//!
//! Pairings that may never broadcast (references against metadata records) are
//! checked with [`require_equal`] instead.

use itertools::Itertools ;
use thiserror::Error ;

use crate::batch::{ Batch, Normalized };



/// When an argument is allowed to be replicated to match its peers.
#[derive( Debug, Clone, Copy, PartialEq, Eq, Hash, Default )]
pub enum Broadcast {
	/// The argument always has to match the canonical length exactly.
	#[default] Never,
	/// The argument broadcasts only if the host supplied it in singular form.
	IfSingular,
	/// The argument broadcasts whenever it holds exactly one element, whether
	/// that came from a singular value or a one-element sequence.
	IfSingleElement,
}

/// The length of one argument taking part in a cardinality check.
#[derive( Debug, Clone, Copy, PartialEq, Eq )]
pub struct Extent {
	name: &'static str,
	len: usize,
	broadcastable: bool,
}

impl Extent {

	pub fn new( name: &'static str, len: usize, broadcastable: bool ) -> Self {
		Self { name, len, broadcastable: broadcastable && len == 1 }
	}

	/// Describes a normalised argument under the given broadcast rule.
	pub fn of<T>( argument: &Normalized<T>, rule: Broadcast ) -> Self {
		let broadcastable = match rule {
			Broadcast::Never => false,
			Broadcast::IfSingular => argument.is_singular(),
			Broadcast::IfSingleElement => argument.len() == 1,
		};
		Self::new( argument.name(), argument.len(), broadcastable )
	}

	#[inline] pub fn name( &self ) -> &'static str { self.name }
	#[inline] pub fn len( &self ) -> usize { self.len }
	#[inline] pub fn is_broadcastable( &self ) -> bool { self.broadcastable }

}

/// Raised when parallel arguments cannot agree on a length.
#[derive( Debug, Clone, PartialEq, Eq, Error )]
pub enum CardinalityError {
	/// Two or more fixed-length arguments differ in length.
	#[error( "Mismatched argument lengths: {}", describe( .lengths ))]
	Mismatch { lengths: Vec<( &'static str, usize )> },
	/// An exact pairing differs in length.
	#[error( "Argument `{left}` has {left_len} elements but `{right}` has {right_len}" )]
	ExactMismatch {
		left: &'static str,
		left_len: usize,
		right: &'static str,
		right_len: usize,
	},
}

fn describe( lengths: &[( &'static str, usize )]) -> String {
	lengths.iter().map(|( name, len )| format!( "`{}` = {}", name, len )).join( ", " )
}

/// Computes the single length all `extents` will share once broadcast.
///
/// # Errors
/// Returns [`CardinalityError::Mismatch`] when the fixed-length arguments
/// disagree.
pub fn canonical_length( extents: &[Extent] ) -> Result<usize, CardinalityError> {

	let fixed = extents.iter()
		.filter(| extent | !extent.broadcastable )
		.map(| extent | extent.len )
		.unique()
		.collect::<Vec<_>>();

	match fixed.as_slice() {
		[] => Ok( 1 ),
		[ len ] => Ok( *len ),
		_ => Err( CardinalityError::Mismatch {
			lengths: extents.iter().map(| extent | ( extent.name, extent.len )).collect(),
		}),
	}

}

/// Checks that two arguments paired one-to-one have equal length.
///
/// # Errors
/// Returns [`CardinalityError::ExactMismatch`] otherwise.
pub fn require_equal( left: Extent, right: Extent ) -> Result<usize, CardinalityError> {
	match left.len == right.len {
		true => Ok( left.len ),
		false => Err( CardinalityError::ExactMismatch {
			left: left.name,
			left_len: left.len,
			right: right.name,
			right_len: right.len,
		}),
	}
}

/// Brings a normalised argument to `len` elements, replicating a single
/// element if needed. The host's values are moved, not shared.
///
/// # Errors
/// Returns [`CardinalityError::Mismatch`] if the argument holds several
/// elements but not exactly `len`.
pub fn broadcast<T: Clone>( argument: Normalized<T>, len: usize ) -> Result<Batch<T>, CardinalityError> {

	if argument.len() == len { return Ok( argument.into_batch() ) }
	if argument.len() != 1 || len == 0 {
		return Err( CardinalityError::Mismatch { lengths: vec![( argument.name(), argument.len() )]});
	}

	let value = argument.into_batch().into_vec().remove( 0 );
	match Batch::try_from_vec( std::iter::repeat_n( value, len ).collect() ) {
		Some( batch ) => Ok( batch ),
		None => Err( CardinalityError::Mismatch { lengths: vec![( "broadcast", len )]}),
	}

}



#[cfg( test )]
mod tests {

	use super::* ;
	use crate::OneOrMany ;

	fn refs( value: impl Into<OneOrMany<String>>, name: &'static str ) -> Normalized<String> {
		value.into().normalize( name ).unwrap()
	}

	#[test]
	fn singular_broadcasts_to_sequence_length() {
		let one = refs( "a", "refs" );
		let many = refs([ "s1", "s2", "s3" ], "specs" );
		let len = canonical_length( &[
			Extent::of( &one, Broadcast::IfSingular ),
			Extent::of( &many, Broadcast::IfSingular ),
		]).unwrap();
		assert_eq!( len, 3 );
		assert_eq!( broadcast( one, len ).unwrap(), vec![ "a".to_string(); 3 ]);
		assert_eq!( broadcast( many, len ).unwrap(), vec![ "s1".to_string(), "s2".to_string(), "s3".to_string() ]);
	}

	#[test]
	fn unequal_multi_element_sequences_are_rejected() {
		let two = refs([ "a", "b" ], "refs" );
		let three = refs([ "x", "y", "z" ], "specs" );
		match canonical_length( &[
			Extent::of( &two, Broadcast::IfSingleElement ),
			Extent::of( &three, Broadcast::IfSingleElement ),
		]) {
			Err( CardinalityError::Mismatch { lengths }) => assert_eq!( lengths, vec![( "refs", 2 ), ( "specs", 3 )]),
			value => panic!( "Expected Mismatch, found: {:?}", value ),
		}
	}

	#[test]
	fn one_element_sequence_only_broadcasts_when_allowed() {
		let single = refs([ "a" ], "primary_strings" );
		let pair = refs([ "r1", "r2" ], "target_refs" );
		assert!( canonical_length( &[
			Extent::of( &single, Broadcast::IfSingular ),
			Extent::of( &pair, Broadcast::IfSingular ),
		]).is_err() );
		assert_eq!( canonical_length( &[
			Extent::of( &single, Broadcast::IfSingleElement ),
			Extent::of( &pair, Broadcast::IfSingleElement ),
		]), Ok( 2 ));
	}

	#[test]
	fn all_singular_yields_length_one() {
		let a = refs( "a", "refs" );
		let b = refs( "b", "specs" );
		assert_eq!( canonical_length( &[
			Extent::of( &a, Broadcast::IfSingular ),
			Extent::of( &b, Broadcast::IfSingular ),
		]), Ok( 1 ));
	}

	#[test]
	fn exact_pairing_never_broadcasts() {
		match require_equal( Extent::new( "target_refs", 2, true ), Extent::new( "entity_specs", 1, true )) {
			Err( CardinalityError::ExactMismatch { left_len: 2, right_len: 1, .. }) => {}
			value => panic!( "Expected ExactMismatch, found: {:?}", value ),
		}
		assert_eq!( require_equal( Extent::new( "a", 4, false ), Extent::new( "b", 4, false )), Ok( 4 ));
	}

	#[test]
	fn broadcast_refuses_to_stretch_sequences() {
		assert!( broadcast( refs([ "a", "b" ], "refs" ), 4 ).is_err() );
	}

	#[test]
	fn mismatch_message_names_every_argument() {
		let error = CardinalityError::Mismatch { lengths: vec![( "refs", 2 ), ( "specs", 3 )]};
		assert_eq!( error.to_string(), "Mismatched argument lengths: `refs` = 2, `specs` = 3" );
	}

}
