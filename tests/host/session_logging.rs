use std::sync::Arc ;
use asset_bridge::{ Host, HostSession, Severity };
use once_cell::sync::Lazy ;
use crate::{ capture_logs, fixture, line_with, CapturingLogger, TestHost, TRACING };

#[test]
fn session_logs_through_its_logger() {

	let logger = Arc::new( CapturingLogger::default() );
	let session = HostSession::with_logger( Host::new( TestHost ), logger.clone() );

	session.log( Severity::Progress, "publishing 2 of 3" );
	session.log( Severity::Warning, "thumbnail skipped" );

	assert_eq!( logger.messages(), vec![
		( Severity::Progress, "publishing 2 of 3".to_string() ),
		( Severity::Warning, "thumbnail skipped".to_string() ),
	]);

}

#[test]
fn default_session_maps_severities_onto_tracing_levels() {

	let session = HostSession::new( Host::new( TestHost ));
	let output = capture_logs(|| {
		session.log( Severity::DebugApi, "api trace" );
		session.log( Severity::Debug, "debug detail" );
		session.log( Severity::Info, "info note" );
		session.log( Severity::Progress, "progress note" );
		session.log( Severity::Warning, "warning note" );
		session.log( Severity::Error, "error note" );
		session.log( Severity::Critical, "critical note" );
	});

	assert!( line_with( &output, "api trace" ).contains( "TRACE" ));
	assert!( line_with( &output, "debug detail" ).contains( "DEBUG" ));
	assert!( line_with( &output, "info note" ).contains( "INFO" ));
	assert!( line_with( &output, "progress note" ).contains( "severity=Progress" ));
	assert!( line_with( &output, "warning note" ).contains( "WARN" ));
	assert!( line_with( &output, "error note" ).contains( "ERROR" ));

	let critical = line_with( &output, "critical note" );
	assert!( critical.contains( "ERROR" ));
	assert!( critical.contains( "severity=Critical" ));
	assert!( critical.contains( "asset_bridge::host" ));

}

#[test]
fn session_equality_is_identity() {

	let first = HostSession::new( Host::new( TestHost ));
	let second = HostSession::new( Host::new( TestHost ));

	assert_eq!( first, first.clone() );
	assert_ne!( first, second );

}

#[test]
fn manager_hands_its_session_to_the_interface() {

	Lazy::force( &TRACING );
	let f = fixture();
	f.manager.entity_exists( "asset://a", &f.context ).unwrap();

	assert_eq!( f.manager.host_session(), &f.session );
	assert_eq!( f.manager.host_session().host().display_name(), "Test Host" );

}

#[test]
fn severities_are_ordered() {

	assert!( Severity::DebugApi < Severity::Info );
	assert!( Severity::Warning < Severity::Critical );
	assert_eq!( Severity::Progress.to_string(), "Progress" );

}
