//! PTP code spaces: standard operations, responses, events, and the SIGMA
//! vendor opcode block.

/// Standard ISO 15740 operation codes (the subset this client issues).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum StandardOp {
    GetDeviceInfo = 0x1001,
    OpenSession = 0x1002,
    CloseSession = 0x1003,
    GetStorageIds = 0x1004,
    GetStorageInfo = 0x1005,
    GetNumObjects = 0x1006,
    GetObjectHandles = 0x1007,
    GetObjectInfo = 0x1008,
    GetObject = 0x1009,
    GetThumb = 0x100A,
    DeleteObject = 0x100B,
    InitiateCapture = 0x100E,
    GetPartialObject = 0x101B,
}

impl From<StandardOp> for u16 {
    fn from(op: StandardOp) -> u16 {
        op as u16
    }
}

/// Standard PTP response codes (0x2000..=0x2023).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ResponseCode {
    Undefined = 0x2000,
    Ok = 0x2001,
    GeneralError = 0x2002,
    SessionNotOpen = 0x2003,
    InvalidTransactionId = 0x2004,
    OperationNotSupported = 0x2005,
    ParameterNotSupported = 0x2006,
    IncompleteTransfer = 0x2007,
    InvalidStorageId = 0x2008,
    InvalidObjectHandle = 0x2009,
    DevicePropNotSupported = 0x200A,
    InvalidObjectFormatCode = 0x200B,
    StoreFull = 0x200C,
    ObjectWriteProtected = 0x200D,
    StoreReadOnly = 0x200E,
    AccessDenied = 0x200F,
    NoThumbnailPresent = 0x2010,
    SelfTestFailed = 0x2011,
    PartialDeletion = 0x2012,
    StoreNotAvailable = 0x2013,
    SpecificationByFormatUnsupported = 0x2014,
    NoValidObjectInfo = 0x2015,
    InvalidCodeFormat = 0x2016,
    UnknownVendorCode = 0x2017,
    CaptureAlreadyTerminated = 0x2018,
    DeviceBusy = 0x2019,
    InvalidParentObject = 0x201A,
    InvalidDevicePropFormat = 0x201B,
    InvalidDevicePropValue = 0x201C,
    InvalidParameter = 0x201D,
    SessionAlreadyOpened = 0x201E,
    TransactionCanceled = 0x201F,
    SpecificationOfDestinationUnsupported = 0x2020,
    InvalidEnumHandle = 0x2021,
    NoStreamEnabled = 0x2022,
    InvalidDataset = 0x2023,
}

impl ResponseCode {
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Maps a wire code back to the enum, if it is a known standard code.
    pub fn from_wire(raw: u16) -> Option<Self> {
        use ResponseCode::*;
        Some(match raw {
            0x2000 => Undefined,
            0x2001 => Ok,
            0x2002 => GeneralError,
            0x2003 => SessionNotOpen,
            0x2004 => InvalidTransactionId,
            0x2005 => OperationNotSupported,
            0x2006 => ParameterNotSupported,
            0x2007 => IncompleteTransfer,
            0x2008 => InvalidStorageId,
            0x2009 => InvalidObjectHandle,
            0x200A => DevicePropNotSupported,
            0x200B => InvalidObjectFormatCode,
            0x200C => StoreFull,
            0x200D => ObjectWriteProtected,
            0x200E => StoreReadOnly,
            0x200F => AccessDenied,
            0x2010 => NoThumbnailPresent,
            0x2011 => SelfTestFailed,
            0x2012 => PartialDeletion,
            0x2013 => StoreNotAvailable,
            0x2014 => SpecificationByFormatUnsupported,
            0x2015 => NoValidObjectInfo,
            0x2016 => InvalidCodeFormat,
            0x2017 => UnknownVendorCode,
            0x2018 => CaptureAlreadyTerminated,
            0x2019 => DeviceBusy,
            0x201A => InvalidParentObject,
            0x201B => InvalidDevicePropFormat,
            0x201C => InvalidDevicePropValue,
            0x201D => InvalidParameter,
            0x201E => SessionAlreadyOpened,
            0x201F => TransactionCanceled,
            0x2020 => SpecificationOfDestinationUnsupported,
            0x2021 => InvalidEnumHandle,
            0x2022 => NoStreamEnabled,
            0x2023 => InvalidDataset,
            _ => return None,
        })
    }
}

/// Standard PTP event codes (0x4000..=0x400E).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum EventCode {
    Undefined = 0x4000,
    CancelTransaction = 0x4001,
    ObjectAdded = 0x4002,
    ObjectRemoved = 0x4003,
    StoreAdded = 0x4004,
    StoreRemoved = 0x4005,
    DevicePropChanged = 0x4006,
    ObjectInfoChanged = 0x4007,
    DeviceInfoChanged = 0x4008,
    RequestObjectTransfer = 0x4009,
    StoreFull = 0x400A,
    DeviceReset = 0x400B,
    StorageInfoChanged = 0x400C,
    CaptureComplete = 0x400D,
    UnreportedStatus = 0x400E,
}

impl EventCode {
    pub fn code(self) -> u16 {
        self as u16
    }
}

/// SIGMA vendor operation codes.
///
/// The focus, movie, clock-adjust and can-set-info operations are part of the
/// code space but carry record layouts this client does not model yet; they
/// can still be issued through the raw transaction primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum VendorOp {
    GetCamDataGroup1 = 0x9012,
    GetCamDataGroup2 = 0x9013,
    GetCamDataGroup3 = 0x9014,
    GetCamCaptStatus = 0x9015,
    SetCamDataGroup1 = 0x9016,
    SetCamDataGroup2 = 0x9017,
    SetCamDataGroup3 = 0x9018,
    SetCamClockAdj = 0x9019,
    SnapCommand = 0x901B,
    ClearImageDbSingle = 0x901C,
    GetBigPartialPictFile = 0x9022,
    GetCamDataGroup4 = 0x9023,
    SetCamDataGroup4 = 0x9024,
    GetCamDataGroup5 = 0x9027,
    SetCamDataGroup5 = 0x9028,
    GetLastCommandData = 0x9029,
    FreeArrayMemory = 0x902A,
    GetViewFrame = 0x902B,
    GetPictFileInfo2 = 0x902D,
    CloseApplication = 0x902F,
    GetCamCanSetInfo5 = 0x9030,
    GetCamDataGroupFocus = 0x9031,
    SetCamDataGroupFocus = 0x9032,
    GetCamDataGroupMovie = 0x9033,
    SetCamDataGroupMovie = 0x9034,
    ConfigApi = 0x9035,
    GetMovieFileInfo = 0x9036,
    GetPartialMovieFile = 0x9037,
}

impl From<VendorOp> for u16 {
    fn from(op: VendorOp) -> u16 {
        op as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_code_from_wire() {
        assert_eq!(ResponseCode::from_wire(0x2001), Some(ResponseCode::Ok));
        assert_eq!(
            ResponseCode::from_wire(0x2019),
            Some(ResponseCode::DeviceBusy)
        );
        assert_eq!(
            ResponseCode::from_wire(0x2023),
            Some(ResponseCode::InvalidDataset)
        );
        assert_eq!(ResponseCode::from_wire(0x2024), None);
        assert_eq!(ResponseCode::from_wire(0x1FFF), None);
    }

    #[test]
    fn test_vendor_opcode_values() {
        assert_eq!(u16::from(VendorOp::GetCamDataGroup1), 0x9012);
        assert_eq!(u16::from(VendorOp::SetCamDataGroup3), 0x9018);
        assert_eq!(u16::from(VendorOp::ConfigApi), 0x9035);
        assert_eq!(u16::from(VendorOp::GetPartialMovieFile), 0x9037);
    }

    #[test]
    fn test_event_codes() {
        assert_eq!(EventCode::ObjectAdded.code(), 0x4002);
        assert_eq!(EventCode::UnreportedStatus.code(), 0x400E);
    }
}
