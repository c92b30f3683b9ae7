use std::net::SocketAddr;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// Minimal DNS server answering every query with one fixed PTR record,
/// or NXDOMAIN when no hostname is configured.
pub struct MockPtrServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockPtrServer {
    pub async fn start(hostname: Option<&str>) -> std::io::Result<Self> {
        let socket = UdpSocket::bind("127.0.0.1:0").await?;
        let addr = socket.local_addr()?;
        let hostname = hostname.map(str::to_string);

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            let response = Self::build_response(&buf[..len], hostname.as_deref());
                            let _ = socket.send_to(&response, peer).await;
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn build_response(query: &[u8], hostname: Option<&str>) -> Vec<u8> {
        if query.len() < 12 {
            return vec![];
        }

        let mut response = Vec::with_capacity(512);
        response.extend_from_slice(&query[0..2]); // Transaction ID
        response.push(0x81); // QR=1, RD=1
        response.push(if hostname.is_some() { 0x80 } else { 0x83 }); // RA=1, RCODE
        response.extend_from_slice(&query[4..6]); // QDCOUNT
        response.extend_from_slice(&[0x00, u8::from(hostname.is_some())]); // ANCOUNT
        response.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]); // NSCOUNT, ARCOUNT
        response.extend_from_slice(&query[12..]); // Question

        if let Some(hostname) = hostname {
            let mut rdata = Vec::new();
            for label in hostname.split('.').filter(|l| !l.is_empty()) {
                rdata.push(label.len() as u8);
                rdata.extend_from_slice(label.as_bytes());
            }
            rdata.push(0);

            response.extend_from_slice(&[
                0xc0, 0x0c, // Name pointer to question
                0x00, 0x0c, // Type PTR
                0x00, 0x01, // Class IN
                0x00, 0x00, 0x00, 0x3c, // TTL 60
            ]);
            response.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
            response.extend_from_slice(&rdata);
        }

        response
    }
}

impl Drop for MockPtrServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
