/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

//! FIX tag numbers and the tag-to-kind lookup table.
//!
//! The table covers the session-level tags plus the common order-flow tags
//! whose values are numeric or single characters. Any tag missing from
//! [`kind_of`] is carried as an opaque [`FieldKind::String`].

use crate::field::FieldKind;

/// AvgPx (6).
pub const AVG_PX: u32 = 6;
/// BeginSeqNo (7).
pub const BEGIN_SEQ_NO: u32 = 7;
/// BeginString (8), always the first field.
pub const BEGIN_STRING: u32 = 8;
/// BodyLength (9), always the second field.
pub const BODY_LENGTH: u32 = 9;
/// CheckSum (10), always the last field.
pub const CHECK_SUM: u32 = 10;
/// CumQty (14).
pub const CUM_QTY: u32 = 14;
/// EndSeqNo (16).
pub const END_SEQ_NO: u32 = 16;
/// HandlInst (21).
pub const HANDL_INST: u32 = 21;
/// LastPx (31).
pub const LAST_PX: u32 = 31;
/// LastQty (32).
pub const LAST_QTY: u32 = 32;
/// MsgSeqNum (34).
pub const MSG_SEQ_NUM: u32 = 34;
/// MsgType (35), always the third field.
pub const MSG_TYPE: u32 = 35;
/// NewSeqNo (36).
pub const NEW_SEQ_NO: u32 = 36;
/// OrderQty (38).
pub const ORDER_QTY: u32 = 38;
/// OrdStatus (39).
pub const ORD_STATUS: u32 = 39;
/// OrdType (40).
pub const ORD_TYPE: u32 = 40;
/// PossDupFlag (43).
pub const POSS_DUP_FLAG: u32 = 43;
/// Price (44).
pub const PRICE: u32 = 44;
/// RefSeqNum (45).
pub const REF_SEQ_NUM: u32 = 45;
/// SenderCompID (49).
pub const SENDER_COMP_ID: u32 = 49;
/// SendingTime (52).
pub const SENDING_TIME: u32 = 52;
/// Side (54).
pub const SIDE: u32 = 54;
/// TargetCompID (56).
pub const TARGET_COMP_ID: u32 = 56;
/// Text (58).
pub const TEXT: u32 = 58;
/// TimeInForce (59).
pub const TIME_IN_FORCE: u32 = 59;
/// PossResend (97).
pub const POSS_RESEND: u32 = 97;
/// EncryptMethod (98).
pub const ENCRYPT_METHOD: u32 = 98;
/// StopPx (99).
pub const STOP_PX: u32 = 99;
/// HeartBtInt (108).
pub const HEART_BT_INT: u32 = 108;
/// TestReqID (112).
pub const TEST_REQ_ID: u32 = 112;
/// OrigSendingTime (122).
pub const ORIG_SENDING_TIME: u32 = 122;
/// GapFillFlag (123).
pub const GAP_FILL_FLAG: u32 = 123;
/// ResetSeqNumFlag (141).
pub const RESET_SEQ_NUM_FLAG: u32 = 141;
/// ExecType (150).
pub const EXEC_TYPE: u32 = 150;
/// LeavesQty (151).
pub const LEAVES_QTY: u32 = 151;
/// RefTagID (371).
pub const REF_TAG_ID: u32 = 371;
/// RefMsgType (372).
pub const REF_MSG_TYPE: u32 = 372;
/// SessionRejectReason (373).
pub const SESSION_REJECT_REASON: u32 = 373;

/// Returns the value kind the wire format uses for `tag`.
///
/// Unknown tags map to [`FieldKind::String`].
#[inline]
#[must_use]
pub const fn kind_of(tag: u32) -> FieldKind {
    match tag {
        BEGIN_SEQ_NO | BODY_LENGTH | END_SEQ_NO | MSG_SEQ_NUM | NEW_SEQ_NO | REF_SEQ_NUM
        | ENCRYPT_METHOD | HEART_BT_INT | REF_TAG_ID | SESSION_REJECT_REASON => FieldKind::Int,
        AVG_PX | CUM_QTY | LAST_PX | LAST_QTY | ORDER_QTY | PRICE | STOP_PX | LEAVES_QTY => {
            FieldKind::Float
        }
        HANDL_INST | ORD_STATUS | ORD_TYPE | POSS_DUP_FLAG | SIDE | TIME_IN_FORCE | POSS_RESEND
        | GAP_FILL_FLAG | EXEC_TYPE | RESET_SEQ_NUM_FLAG => FieldKind::Char,
        CHECK_SUM => FieldKind::CheckSum,
        _ => FieldKind::String,
    }
}

/// Returns true for tags the serializer writes itself.
///
/// These never appear in a message's body field sequence.
#[inline]
#[must_use]
pub const fn is_framing(tag: u32) -> bool {
    matches!(tag, BEGIN_STRING | BODY_LENGTH | MSG_TYPE | CHECK_SUM)
}

/// Returns the protocol name of a known tag.
#[must_use]
pub const fn name_of(tag: u32) -> Option<&'static str> {
    Some(match tag {
        AVG_PX => "AvgPx",
        BEGIN_SEQ_NO => "BeginSeqNo",
        BEGIN_STRING => "BeginString",
        BODY_LENGTH => "BodyLength",
        CHECK_SUM => "CheckSum",
        CUM_QTY => "CumQty",
        END_SEQ_NO => "EndSeqNo",
        HANDL_INST => "HandlInst",
        LAST_PX => "LastPx",
        LAST_QTY => "LastQty",
        MSG_SEQ_NUM => "MsgSeqNum",
        MSG_TYPE => "MsgType",
        NEW_SEQ_NO => "NewSeqNo",
        ORDER_QTY => "OrderQty",
        ORD_STATUS => "OrdStatus",
        ORD_TYPE => "OrdType",
        POSS_DUP_FLAG => "PossDupFlag",
        PRICE => "Price",
        REF_SEQ_NUM => "RefSeqNum",
        SENDER_COMP_ID => "SenderCompID",
        SENDING_TIME => "SendingTime",
        SIDE => "Side",
        TARGET_COMP_ID => "TargetCompID",
        TEXT => "Text",
        TIME_IN_FORCE => "TimeInForce",
        POSS_RESEND => "PossResend",
        ENCRYPT_METHOD => "EncryptMethod",
        STOP_PX => "StopPx",
        HEART_BT_INT => "HeartBtInt",
        TEST_REQ_ID => "TestReqID",
        ORIG_SENDING_TIME => "OrigSendingTime",
        GAP_FILL_FLAG => "GapFillFlag",
        RESET_SEQ_NUM_FLAG => "ResetSeqNumFlag",
        EXEC_TYPE => "ExecType",
        LEAVES_QTY => "LeavesQty",
        REF_TAG_ID => "RefTagID",
        REF_MSG_TYPE => "RefMsgType",
        SESSION_REJECT_REASON => "SessionRejectReason",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_of_known_tags() {
        assert_eq!(kind_of(MSG_SEQ_NUM), FieldKind::Int);
        assert_eq!(kind_of(HEART_BT_INT), FieldKind::Int);
        assert_eq!(kind_of(GAP_FILL_FLAG), FieldKind::Char);
        assert_eq!(kind_of(SIDE), FieldKind::Char);
        assert_eq!(kind_of(PRICE), FieldKind::Float);
        assert_eq!(kind_of(CHECK_SUM), FieldKind::CheckSum);
        assert_eq!(kind_of(SENDER_COMP_ID), FieldKind::String);
    }

    #[test]
    fn test_kind_of_unknown_tag_is_string() {
        assert_eq!(kind_of(1), FieldKind::String);
        assert_eq!(kind_of(9999), FieldKind::String);
    }

    #[test]
    fn test_is_framing() {
        assert!(is_framing(BEGIN_STRING));
        assert!(is_framing(CHECK_SUM));
        assert!(!is_framing(SENDER_COMP_ID));
    }

    #[test]
    fn test_name_of() {
        assert_eq!(name_of(TEST_REQ_ID), Some("TestReqID"));
        assert_eq!(name_of(5001), None);
    }
}
