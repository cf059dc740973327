use serde::{Deserialize, Serialize};

use super::MemberId;

/// 会員。登録後は変更されない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
}

/// 登録前の会員。名前の重複は許可する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub name: String,
}

impl NewMember {
    pub fn with_id(self, id: MemberId) -> Member {
        Member { id, name: self.name }
    }
}
