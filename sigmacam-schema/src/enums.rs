//! Coded value sets carried inside the vendor data groups.
//!
//! Each field keeps the full code set of the camera firmware. Codes outside
//! the documented set decode to `Unknown(raw)` rather than failing, since new
//! bodies add codes without bumping the record layout.

macro_rules! code_enum {
    ($(#[$meta:meta])* $name:ident {
        $($(#[$vmeta:meta])* $variant:ident = $code:literal,)+
    }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// Code not in the documented set, preserved raw.
            Unknown(u8),
        }

        impl $name {
            pub fn code(self) -> u8 {
                match self {
                    $(Self::$variant => $code,)+
                    Self::Unknown(code) => code,
                }
            }

            pub fn from_code(code: u8) -> Self {
                match code {
                    $($code => Self::$variant,)+
                    other => Self::Unknown(other),
                }
            }
        }
    };
}

code_enum!(ProgramShift {
    Null = 0x00,
    Plus = 0x01,
    Minus = 0xFF,
});

code_enum!(IsoAuto {
    Manual = 0x00,
    Auto = 0x01,
});

code_enum!(AbSetting {
    Null = 0x00,
    Ab3ZeroMinusPlus = 0x01,
    Ab3MinusZeroPlus = 0x02,
    Ab3PlusZeroMinus = 0x03,
    Ab5ZeroMinusPlus = 0x04,
    Ab5MinusZeroPlus = 0x05,
    Ab5PlusZeroMinus = 0x06,
});

code_enum!(DriveMode {
    Null = 0x00,
    SingleCapture = 0x01,
    ContinuousCapture = 0x02,
    TwoSecondsSelfTimer = 0x03,
    TenSecondsSelfTimer = 0x04,
    IntervalTimer = 0x07,
});

code_enum!(SpecialMode {
    Null = 0x00,
    LiveView = 0x02,
});

code_enum!(ExposureMode {
    Null = 0x00,
    ProgramAuto = 0x01,
    AperturePriority = 0x02,
    ShutterPriority = 0x03,
    Manual = 0x04,
    C1 = 0x10,
    C2 = 0x20,
    C3 = 0x40,
    Star = 0x80,
});

code_enum!(AeMeteringMode {
    Null = 0x00,
    Evaluative = 0x01,
    CenterWeightedAverage = 0x02,
    CenterArea = 0x03,
    Spot = 0x04,
});

code_enum!(FlashType {
    Null = 0x00,
    InternalPopupFlash = 0x01,
    ExternalFlash = 0x02,
});

code_enum!(FlashMode {
    Normal = 0x00,
    RedEyeReduction = 0x01,
    FpEmission = 0x02,
    MultiFlash = 0x04,
    WirelessFlash1 = 0x08,
    WirelessFlash2 = 0x10,
    WirelessFlash3 = 0x20,
    SlowSync = 0x40,
});

code_enum!(FlashSetting {
    Null = 0x00,
    TtlAuto = 0x01,
    TtlManual = 0x02,
    EmissionDisabled = 0x80,
    ExposureWarning = 0x81,
});

code_enum!(WhiteBalance {
    Null = 0x00,
    Auto = 0x01,
    Sunlight = 0x02,
    Shade = 0x03,
    Overcast = 0x04,
    Incandescent = 0x05,
    Fluorescent = 0x06,
    Flash = 0x07,
    Custom1 = 0x08,
    CustomCapt1 = 0x09,
    Custom2 = 0x0A,
    CustomCapt2 = 0x0B,
    Custom3 = 0x0C,
    CustomCapt3 = 0x0D,
    ColorTemp = 0x0E,
    LightSource = 0x0F,
});

code_enum!(Resolution {
    Null = 0x00,
    High = 0x01,
    Medium = 0x02,
    Low = 0x04,
});

code_enum!(ImageQuality {
    JpegFine = 0x02,
    JpegNormal = 0x04,
    JpegBasic = 0x08,
    Dng = 0x10,
    DngAndJpeg = 0x12,
});

code_enum!(ColorSpace {
    Null = 0x00,
    Srgb = 0x01,
    AdobeRgb = 0x02,
});

code_enum!(ColorMode {
    Normal = 0x00,
    Sepia = 0x01,
    Monochrome = 0x02,
    Standard = 0x03,
    Vivid = 0x04,
    Neutral = 0x05,
    Portrait = 0x06,
    Landscape = 0x07,
    FovClassicBlue = 0x08,
    Sunset = 0x09,
    Forest = 0x0A,
    Cinema = 0x0B,
    FovClassicYellow = 0x0C,
});

code_enum!(BatteryKind {
    Null = 0x00,
    BodyBattery = 0x01,
    AcAdapter = 0x02,
});

code_enum!(AfAuxLight {
    Null = 0x00,
    On = 0x01,
    Off = 0x02,
});

code_enum!(CaptureMode {
    Null = 0x00,
    GeneralCapt = 0x01,
    NonAfCapt = 0x02,
    AfDriveOnly = 0x03,
    StartAf = 0x04,
    StopAf = 0x05,
    StartCapt = 0x06,
    StopCapt = 0x07,
    StartRecMovieAf = 0x10,
    StartRecMovie = 0x20,
    StopRecMovie = 0x30,
});

code_enum!(DestToSave {
    Null = 0x00,
    InCamera = 0x01,
    InComputer = 0x02,
    Both = 0x03,
});

code_enum!(DcCropMode {
    Auto = 0x00,
    Off = 0x01,
    On = 0x02,
});

code_enum!(LvMagnifyRatio {
    Null = 0x00,
    X1 = 0x01,
    X4 = 0x02,
    X8 = 0x03,
});

code_enum!(HighIsoExt {
    Auto = 0x00,
    Off = 0x01,
    On = 0x02,
});

code_enum!(ContShootSpeed {
    Auto = 0x00,
    High = 0x01,
    Medium = 0x02,
    Low = 0x03,
});

code_enum!(Hdr {
    Null = 0x00,
    PlusMinus1 = 0x01,
    PlusMinus2 = 0x02,
    PlusMinus3 = 0x03,
    Auto = 0xFE,
    Off = 0xFF,
});

code_enum!(DngQuality {
    Bits12 = 12,
    Bits14 = 14,
});

code_enum!(LocDistortion {
    Null = 0x00,
    Auto = 0x01,
    Off = 0x02,
});

code_enum!(LocChromaticAberration {
    Null = 0x00,
    Auto = 0x01,
    Off = 0x02,
});

code_enum!(LocDiffraction {
    Null = 0x00,
    On = 0x01,
    Off = 0x02,
});

code_enum!(LocVignetting {
    Null = 0x00,
    Auto = 0x01,
    Off = 0x02,
});

code_enum!(LocColorShade {
    Null = 0x00,
    No1 = 0x01,
    No2 = 0x02,
    No3 = 0x03,
    No4 = 0x04,
    No5 = 0x05,
    No6 = 0x06,
    No7 = 0x07,
    No8 = 0x08,
    No9 = 0x09,
    No10 = 0x0A,
    Off = 0xFE,
    Auto = 0xFF,
});

code_enum!(LocColorShadeAcq {
    Null = 0x00,
    On = 0x01,
    Off = 0x02,
});

code_enum!(EImageStab {
    Null = 0x00,
    On = 0x01,
    Off = 0x02,
});

code_enum!(AspectRatio {
    Null = 0x00,
    W21H9 = 0x01,
    W16H9 = 0x02,
    W3H2 = 0x03,
    W4H3 = 0x04,
    W7H6 = 0x05,
    W1H1 = 0x06,
    WSqrt2H1 = 0x07,
});

code_enum!(ToneEffect {
    Null = 0x00,
    BlackAndWhite = 0x01,
});

code_enum!(AfAuxLightEf {
    Null = 0x00,
    On = 0x01,
    Off = 0x02,
});

/// Capture pipeline status, a 16-bit code in [`crate::CamCaptStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptStatus {
    Cleared,
    ShootInProgress,
    ShootSuccess,
    ImageGenInProgress,
    ImageGenCompleted,
    StopMovieRec,
    MovieGenCompleted,
    AfFailed,
    BufferFull,
    CwbFailed,
    ImageGenFailed,
    Failed,
    AfSuccess,
    CwbSuccess,
    ImageDataStorageCompleted,
    Interrupted,
    /// Code not in the documented set, preserved raw.
    Unknown(u16),
}

impl CaptStatus {
    pub fn code(self) -> u16 {
        match self {
            Self::Cleared => 0x0000,
            Self::ShootInProgress => 0x0001,
            Self::ShootSuccess => 0x0002,
            Self::ImageGenInProgress => 0x0004,
            Self::ImageGenCompleted => 0x0005,
            Self::StopMovieRec => 0x0006,
            Self::MovieGenCompleted => 0x0007,
            Self::AfFailed => 0x6001,
            Self::BufferFull => 0x6002,
            Self::CwbFailed => 0x6003,
            Self::ImageGenFailed => 0x6004,
            Self::Failed => 0x6005,
            Self::AfSuccess => 0x8001,
            Self::CwbSuccess => 0x8002,
            Self::ImageDataStorageCompleted => 0x8003,
            Self::Interrupted => 0x8004,
            Self::Unknown(code) => code,
        }
    }

    pub fn from_code(code: u16) -> Self {
        match code {
            0x0000 => Self::Cleared,
            0x0001 => Self::ShootInProgress,
            0x0002 => Self::ShootSuccess,
            0x0004 => Self::ImageGenInProgress,
            0x0005 => Self::ImageGenCompleted,
            0x0006 => Self::StopMovieRec,
            0x0007 => Self::MovieGenCompleted,
            0x6001 => Self::AfFailed,
            0x6002 => Self::BufferFull,
            0x6003 => Self::CwbFailed,
            0x6004 => Self::ImageGenFailed,
            0x6005 => Self::Failed,
            0x8001 => Self::AfSuccess,
            0x8002 => Self::CwbSuccess,
            0x8003 => Self::ImageDataStorageCompleted,
            0x8004 => Self::Interrupted,
            other => Self::Unknown(other),
        }
    }

    /// Capture finished and the result is ready (or there is nothing to
    /// wait for).
    pub fn is_terminal_success(self) -> bool {
        matches!(
            self,
            Self::ImageGenCompleted | Self::ImageDataStorageCompleted | Self::Cleared
        )
    }

    /// Capture still making progress; worth polling again.
    pub fn is_in_progress(self) -> bool {
        matches!(
            self,
            Self::ShootInProgress
                | Self::ShootSuccess
                | Self::ImageGenInProgress
                | Self::AfSuccess
                | Self::CwbSuccess
        )
    }
}
