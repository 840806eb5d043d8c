//! Host-side collaborators handed to the manager.
//!
//! A manager interface never talks to the host application directly. It gets
//! a [`HostSession`] on every call, which gives it access to a [`Host`] (a thin
//! wrapper over the application's [`HostInterface`]) and a logger.

use std::sync::Arc ;

use crate::{ EntityReference, EntitySpecification, InfoDictionary };



/// Implemented by the host application to describe itself to managers.
pub trait HostInterface: Send + Sync {

	/// Unique identifier of the host, e.g. `"org.example.compositor"`.
	fn identifier( &self ) -> String ;

	/// Human readable name of the host.
	fn display_name( &self ) -> String ;

	fn info( &self ) -> InfoDictionary { InfoDictionary::new() }

	/// Reference of the document currently open in the host, or an empty string.
	fn document_reference( &self ) -> String { String::new() }

	/// Entity references the host currently knows about, optionally filtered
	/// to those matching `specification`.
	fn known_entity_references( &self, _specification: Option<&EntitySpecification> ) -> Vec<EntityReference> {
		Vec::new()
	}

}

/// The manager-facing view of a [`HostInterface`].
///
/// Every method forwards to the wrapped interface unchanged.
#[derive( Clone )]
pub struct Host {
	interface: Arc<dyn HostInterface>,
}

impl Host {

	pub fn new( interface: impl HostInterface + 'static ) -> Self {
		Self { interface: Arc::new( interface )}
	}

	pub fn from_arc( interface: Arc<dyn HostInterface> ) -> Self {
		Self { interface }
	}

	#[inline] pub fn interface( &self ) -> &Arc<dyn HostInterface> { &self.interface }

	pub fn identifier( &self ) -> String { self.interface.identifier() }
	pub fn display_name( &self ) -> String { self.interface.display_name() }
	pub fn info( &self ) -> InfoDictionary { self.interface.info() }
	pub fn document_reference( &self ) -> String { self.interface.document_reference() }

	pub fn known_entity_references( &self, specification: Option<&EntitySpecification> ) -> Vec<EntityReference> {
		self.interface.known_entity_references( specification )
	}

}

impl std::fmt::Debug for Host {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "Host" ).finish_non_exhaustive()
	}
}

/// Severity of a message logged through a [`HostSession`].
#[derive( Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash )]
pub enum Severity {
	DebugApi,
	Debug,
	Info,
	Progress,
	Warning,
	Error,
	Critical,
}

impl std::fmt::Display for Severity {
	fn fmt( &self, f: &mut std::fmt::Formatter ) -> std::fmt::Result { write!( f, "{:?}", self )}
}

/// Receives messages managers and the bridge want shown to the user or logged.
pub trait LoggerInterface: Send + Sync {
	fn log( &self, severity: Severity, message: &str );
}

/// Routes host session messages into `tracing`.
#[derive( Debug, Clone, Copy, Default )]
pub struct TracingLogger ;

impl LoggerInterface for TracingLogger {
	fn log( &self, severity: Severity, message: &str ) {
		match severity {
			Severity::DebugApi => tracing::trace!( target: "asset_bridge::host", "{}", message ),
			Severity::Debug => tracing::debug!( target: "asset_bridge::host", "{}", message ),
			Severity::Info | Severity::Progress => tracing::info!( target: "asset_bridge::host", %severity, "{}", message ),
			Severity::Warning => tracing::warn!( target: "asset_bridge::host", "{}", message ),
			Severity::Error | Severity::Critical => tracing::error!( target: "asset_bridge::host", %severity, "{}", message ),
		}
	}
}

struct SessionInner {
	host: Host,
	logger: Arc<dyn LoggerInterface>,
}

/// The per-session services object passed to every manager interface call.
///
/// Cheap to clone; clones refer to the same session, and equality is identity.
#[derive( Clone )]
pub struct HostSession {
	inner: Arc<SessionInner>,
}

impl HostSession {

	/// Creates a session that logs through [`TracingLogger`].
	pub fn new( host: Host ) -> Self {
		Self::with_logger( host, Arc::new( TracingLogger ))
	}

	pub fn with_logger( host: Host, logger: Arc<dyn LoggerInterface> ) -> Self {
		Self { inner: Arc::new( SessionInner { host, logger })}
	}

	#[inline] pub fn host( &self ) -> &Host { &self.inner.host }

	pub fn log( &self, severity: Severity, message: &str ) {
		self.inner.logger.log( severity, message );
	}

}

impl PartialEq for HostSession {
	fn eq( &self, other: &Self ) -> bool { Arc::ptr_eq( &self.inner, &other.inner )}
}

impl std::fmt::Debug for HostSession {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "HostSession" )
			.field( "host", &self.inner.host )
			.finish_non_exhaustive()
	}
}
