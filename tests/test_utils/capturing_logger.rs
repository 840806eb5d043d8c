use asset_bridge::{ LoggerInterface, Severity };
use once_cell::sync::Lazy ;

/// Installs a subscriber once so `tracing` output shows up in test failures.
pub static TRACING: Lazy<()> = Lazy::new(|| {
	let _ = tracing_subscriber::fmt()
		.with_max_level( tracing::Level::TRACE )
		.with_test_writer()
		.try_init();
});

#[derive( Debug, Default )]
pub struct CapturingLogger {
	messages: Mutex<Vec<( Severity, String )>>,
}

impl CapturingLogger {
	pub fn messages( &self ) -> Vec<( Severity, String )> { self.messages.lock().unwrap().clone() }
}

impl LoggerInterface for CapturingLogger {
	fn log( &self, severity: Severity, message: &str ) {
		self.messages.lock().unwrap().push(( severity, message.to_string() ));
	}
}

/// Formatted `tracing` output, shared with the subscriber that writes it.
#[derive( Debug, Clone, Default )]
pub struct LogBuffer( Arc<Mutex<Vec<u8>>> );

impl std::io::Write for LogBuffer {
	fn write( &mut self, bytes: &[u8] ) -> std::io::Result<usize> {
		self.0.lock().unwrap().extend_from_slice( bytes );
		Ok( bytes.len() )
	}
	fn flush( &mut self ) -> std::io::Result<()> { Ok(()) }
}

/// Runs `run` under a thread-local subscriber and returns everything it logged.
pub fn capture_logs( run: impl FnOnce() ) -> String {
	let buffer = LogBuffer::default();
	let writer = buffer.clone();
	let subscriber = tracing_subscriber::fmt()
		.with_max_level( tracing::Level::TRACE )
		.with_ansi( false )
		.with_writer( move || writer.clone() )
		.finish();
	tracing::subscriber::with_default( subscriber, run );
	let bytes = buffer.0.lock().unwrap().clone();
	String::from_utf8_lossy( &bytes ).into_owned()
}

pub fn line_with<'a>( output: &'a str, needle: &str ) -> &'a str {
	output.lines()
		.find(| line | line.contains( needle ))
		.unwrap_or_else(|| panic!( "No log line containing {:?} in:\n{}", needle, output ))
}
