use std::sync::Arc ;
use std::sync::atomic::{ AtomicUsize, Ordering };
use asset_bridge::{ EntityReference, EntitySpecification, Host, HostInterface, HostSession, InfoDictionary, Value };
use crate::{ spec, TestHost };

struct Compositor ;

impl HostInterface for Compositor {

	fn identifier( &self ) -> String { "org.example.compositor".to_string() }
	fn display_name( &self ) -> String { "Compositor".to_string() }

	fn info( &self ) -> InfoDictionary {
		asset_bridge::metadata([( "version", Value::from( "14.1" ))])
	}

	fn document_reference( &self ) -> String { "asset://comp/main".to_string() }

	fn known_entity_references( &self, specification: Option<&EntitySpecification> ) -> Vec<EntityReference> {
		match specification.map( EntitySpecification::schema ) {
			Some( "core.entity.image" ) => vec![ EntityReference::from( "asset://plate/010" )],
			Some( _ ) => Vec::new(),
			None => vec![ EntityReference::from( "asset://plate/010" ), EntityReference::from( "asset://comp/main" )],
		}
	}

}

#[test]
fn host_forwards_to_its_interface() {

	let host = Host::new( Compositor );
	assert_eq!( host.identifier(), "org.example.compositor" );
	assert_eq!( host.display_name(), "Compositor" );
	assert_eq!( host.info().get( "version" ), Some( &Value::from( "14.1" )));
	assert_eq!( host.document_reference(), "asset://comp/main" );

}

#[test]
fn known_references_are_filtered_by_the_host() {

	let host = Host::new( Compositor );
	assert_eq!( host.known_entity_references( None ).len(), 2 );
	assert_eq!( host.known_entity_references( Some( &spec( "core.entity.image" ))), vec![ EntityReference::from( "asset://plate/010" )]);
	assert!( host.known_entity_references( Some( &spec( "core.entity.file" ))).is_empty() );

}

#[test]
fn host_interface_defaults_are_empty() {

	let host = Host::from_arc( Arc::new( TestHost ));
	assert!( host.info().is_empty() );
	assert_eq!( host.document_reference(), "" );
	assert!( host.known_entity_references( None ).is_empty() );

}

#[derive( Default )]
struct CountingHost {
	identifier_calls: Arc<AtomicUsize>,
}

impl HostInterface for CountingHost {
	fn identifier( &self ) -> String {
		self.identifier_calls.fetch_add( 1, Ordering::SeqCst );
		"org.example.counting".to_string()
	}
	fn display_name( &self ) -> String { "Counting Host".to_string() }
}

#[test]
fn formatting_does_not_call_into_the_host() {

	let host = CountingHost::default();
	let identifier_calls = Arc::clone( &host.identifier_calls );
	let host = Host::new( host );
	let session = HostSession::new( host.clone() );

	assert_eq!( format!( "{:?}", host ), "Host { .. }" );
	assert!( format!( "{:?}", session ).starts_with( "HostSession" ));
	assert_eq!( identifier_calls.load( Ordering::SeqCst ), 0 );

	assert_eq!( host.identifier(), "org.example.counting" );
	assert_eq!( identifier_calls.load( Ordering::SeqCst ), 1 );

}
