use asset_bridge::{ CardinalityError, ManagerError };
use crate::{ fixture, refs, spec, Arg, Call };

#[test]
fn one_specification_per_target() {

	let f = fixture();
	let targets = f.manager.preflight(
		[ "asset://r1", "asset://r2" ],
		vec![ spec( "core.entity.image" ), spec( "core.entity.file" )],
		&f.context,
	).unwrap();
	assert_eq!( targets, refs( &[ "asset://r1", "asset://r2" ]));

	let [ context, session ] = f.env();
	assert_eq!( f.interface.calls(), vec![ Call::new( "preflight", vec![
		Arg::Refs( refs( &[ "asset://r1", "asset://r2" ])),
		Arg::Specs( vec![ spec( "core.entity.image" ), spec( "core.entity.file" )]),
		context,
		session,
	])]);

}

#[test]
fn two_targets_against_one_specification_is_rejected() {

	let f = fixture();
	let result = f.manager.preflight( [ "asset://r1", "asset://r2" ], vec![ spec( "core.entity.image" )], &f.context );

	match result {
		Err( ManagerError::Cardinality( CardinalityError::ExactMismatch {
			left: "target_entity_refs",
			left_len: 2,
			right: "entity_specs",
			right_len: 1,
		})) => {}
		other => panic!( "Expected a cardinality error, got: {:#?}", other ),
	}
	assert!( f.interface.calls().is_empty() );

}

#[test]
fn singular_specification_is_not_broadcast() {

	let f = fixture();
	let result = f.manager.preflight( [ "asset://r1", "asset://r2" ], spec( "core.entity.image" ), &f.context );
	assert!( result.unwrap_err().is_cardinality() );
	assert!( f.interface.calls().is_empty() );

}

#[test]
fn singular_target_and_specification() {

	let f = fixture();
	let targets = f.manager.preflight( "asset://r1", spec( "core.entity.image" ), &f.context ).unwrap();
	assert_eq!( targets, refs( &[ "asset://r1" ]));

}
