use zkl2_basic_types::H256;

use super::typed_structure::StructMember;

/// Visitor over the members of a typed structure, in declaration order.
pub trait StructBuilder {
    fn add_member<MEMBER: StructMember>(&mut self, name: &str, member: &MEMBER);
}

/// Collects the `type name` pairs and the encoded words of a structure at once.
#[derive(Debug, Default)]
pub(crate) struct EncodeBuilder {
    members: Vec<String>,
    encoded: Vec<H256>,
}

impl EncodeBuilder {
    pub(crate) fn encode_type(&self, type_name: &str) -> String {
        format!("{}({})", type_name, self.members.join(","))
    }

    pub(crate) fn encoded_data(self) -> Vec<H256> {
        self.encoded
    }
}

impl StructBuilder for EncodeBuilder {
    fn add_member<MEMBER: StructMember>(&mut self, name: &str, member: &MEMBER) {
        self.members.push(format!("{} {}", MEMBER::MEMBER_TYPE, name));
        self.encoded.push(member.encode_member_data());
    }
}
