use std::future::Future;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use hickory_proto::op::{Message, MessageType, Query};
use hickory_proto::rr::{Name, RecordType as WireRecordType};
use tokio::net::UdpSocket;

use crate::event::RecordType;

/// Capability consumed by the sampling loop: fire one query, report
/// opaque success/failure. Response contents are never inspected.
pub trait QuerySink {
	fn attempt(
		&self,
		domain: &str,
		record_type: RecordType,
	) -> impl Future<Output = bool> + Send;
}

fn wire_type(record_type: RecordType) -> WireRecordType {
	match record_type {
		RecordType::A => WireRecordType::A,
		RecordType::Aaaa => WireRecordType::AAAA,
		RecordType::Mx => WireRecordType::MX,
		RecordType::Txt => WireRecordType::TXT,
		RecordType::Cname => WireRecordType::CNAME,
		RecordType::Ns => WireRecordType::NS,
	}
}

/// Build a recursion-desired DNS query for the given domain and record type.
///
/// Returns the serialized query bytes ready to send over UDP.
pub fn build_query(domain: &str, record_type: RecordType, txid: u16) -> Result<Vec<u8>> {
	let name = Name::from_ascii(domain)
		.map_err(|e| anyhow!("invalid domain name '{}': {}", domain, e))?;

	let mut message = Message::new();
	message.set_id(txid);
	message.set_recursion_desired(true);
	message.add_query(Query::query(name, wire_type(record_type)));

	message.to_vec()
		.map_err(|e| anyhow!("failed to serialize DNS query: {}", e))
}

/// Parse a DNS response and validate the transaction ID.
///
/// Any well-formed matching response counts, whatever its rcode: most
/// synthesized names do not exist, and an NXDOMAIN answer still means the
/// query reached the resolver.
pub fn parse_response(bytes: &[u8], expected_txid: u16) -> Result<()> {
	let message = Message::from_vec(bytes)
		.map_err(|e| anyhow!("failed to parse DNS response: {}", e))?;

	if message.id() != expected_txid {
		return Err(anyhow!(
			"txid mismatch: expected {}, got {}",
			expected_txid, message.id()
		));
	}
	if message.message_type() != MessageType::Response {
		return Err(anyhow!("received a query instead of a response"));
	}
	Ok(())
}

/// Query sink that sends plain UDP queries to a single resolver.
#[derive(Debug, Clone)]
pub struct UdpSink {
	server: SocketAddr,
	timeout: Duration,
}

impl UdpSink {
	pub fn new(server: SocketAddr, timeout: Duration) -> Self {
		Self { server, timeout }
	}
}

impl QuerySink for UdpSink {
	/// Send one query on a dedicated socket and wait for a matching
	/// response within the timeout. Timeouts, socket errors, and
	/// malformed responses all report failure.
	async fn attempt(&self, domain: &str, record_type: RecordType) -> bool {
		let txid: u16 = rand::random();
		let query_bytes = match build_query(domain, record_type, txid) {
			Ok(bytes) => bytes,
			Err(_) => return false,
		};

		let bind_addr = if self.server.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
		let socket = match UdpSocket::bind(bind_addr).await {
			Ok(socket) => socket,
			Err(_) => return false,
		};
		if socket.send_to(&query_bytes, self.server).await.is_err() {
			return false;
		}

		// Retry recv on txid mismatch (stray datagrams), bounded by the
		// overall timeout. 4096-byte buffer handles EDNS-extended responses.
		let start = Instant::now();
		let mut buf = vec![0u8; 4096];
		for _ in 0..3 {
			let elapsed = start.elapsed();
			if elapsed >= self.timeout {
				break;
			}
			match tokio::time::timeout(self.timeout - elapsed, socket.recv_from(&mut buf)).await {
				Ok(Ok((len, _src))) => {
					if parse_response(&buf[..len], txid).is_ok() {
						return true;
					}
				}
				_ => break,
			}
		}
		false
	}
}

/// Parse a resolver address string into a socket address.
///
/// Supports formats:
///   "10.50.0.30"           -- IPv4, default port 53
///   "10.50.0.30:5353"      -- IPv4 with explicit port
///   "2606:4700::1111"      -- bare IPv6, default port 53
///   "[2606:4700::1111]:53" -- bracketed IPv6 with port
pub fn parse_server(input: &str) -> Result<SocketAddr> {
	let trimmed = input.trim();
	if trimmed.is_empty() {
		return Err(anyhow!("empty server address"));
	}

	if trimmed.starts_with('[') {
		// Bracketed IPv6 with port: [::1]:53
		trimmed.parse()
			.map_err(|e| anyhow!("invalid bracketed IPv6 address '{}': {}", trimmed, e))
	} else if trimmed.contains("::") || trimmed.matches(':').count() > 1 {
		// Bare IPv6 address without port
		let ip = trimmed.parse()
			.map_err(|e| anyhow!("invalid IPv6 address '{}': {}", trimmed, e))?;
		Ok(SocketAddr::new(ip, 53))
	} else if let Ok(addr) = trimmed.parse::<SocketAddr>() {
		// IPv4 with port
		Ok(addr)
	} else {
		// Plain IPv4 without port
		let ip = trimmed.parse()
			.map_err(|e| anyhow!("invalid IP address '{}': {}", trimmed, e))?;
		Ok(SocketAddr::new(ip, 53))
	}
}

/// Discover the host's outbound-routable address.
///
/// Opens a UDP socket toward a public resolver and reads the local
/// address the kernel picked; no packet is sent. Returns None when the
/// host has no usable route.
pub fn outbound_ip() -> Option<String> {
	let socket = std::net::UdpSocket::bind("0.0.0.0:0").ok()?;
	socket.connect("8.8.8.8:53").ok()?;
	Some(socket.local_addr().ok()?.ip().to_string())
}
