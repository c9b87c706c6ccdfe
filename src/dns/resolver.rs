use crate::error::Error;
use crate::records::{self, SharedRecords};
use std::net::IpAddr;
use std::sync::Arc;
use trust_dns_proto::op::{Message, MessageType, Query, ResponseCode};
use trust_dns_proto::rr::{DNSClass, RData, Record};

/// TTL in seconds of every answer served.
pub const ANSWER_TTL: u32 = 300;

/// Turns one decoded query into one decoded response using the currently published records.
///
/// The resolver knows nothing about sockets or wire bytes and keeps no state between calls.
#[derive(Clone, Debug)]
pub struct Resolver {
    records: Arc<SharedRecords>,
}

impl Resolver {
    #[must_use]
    pub fn new(records: Arc<SharedRecords>) -> Self {
        Resolver { records }
    }

    /// Resolve the first question of `request`.
    ///
    /// Returns `Ok(None)` when the request carries no question at all. Any further questions are
    /// ignored, as are the query type and class: only the name is matched.
    ///
    /// A matching record yields one answer whose type follows the address family of the
    /// record's address: `A` for IPv4, `AAAA` for IPv6. A name without a record yields an
    /// `NXDOMAIN` response with no answers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAddress`] when the matched record's address isn't an IP literal.
    /// Only this request is affected.
    pub fn resolve(&self, request: &Message) -> Result<Option<Message>, Error> {
        let question = match request.queries().first() {
            Some(question) => question,
            None => return Ok(None),
        };

        let records = self.records.snapshot();
        let mut response = Self::reply_to(request, question);
        match records.find_by_name(&question.name().to_ascii()) {
            None => {
                response.set_response_code(ResponseCode::NXDomain);
            }
            Some(record) => {
                let mut answer =
                    Record::from_rdata(question.name().clone(), ANSWER_TTL, address_rdata(record)?);
                answer.set_dns_class(DNSClass::IN);
                response.add_answer(answer);
            }
        }
        Ok(Some(response))
    }

    fn reply_to(request: &Message, question: &Query) -> Message {
        let mut response = Message::new();
        response
            .set_id(request.id())
            .set_message_type(MessageType::Response)
            .set_op_code(request.op_code())
            .set_recursion_desired(request.recursion_desired())
            .set_checking_disabled(request.checking_disabled())
            .set_response_code(ResponseCode::NoError)
            .add_query(question.clone());
        response
    }
}

fn address_rdata(record: &records::Record) -> Result<RData, Error> {
    let ip: IpAddr = record
        .address
        .parse()
        .map_err(|source| Error::InvalidAddress {
            hostname: record.hostname.clone(),
            address: record.address.clone(),
            source,
        })?;
    Ok(match ip {
        IpAddr::V4(ipv4_addr) => RData::A(ipv4_addr),
        IpAddr::V6(ipv6_addr) => RData::AAAA(ipv6_addr),
    })
}
