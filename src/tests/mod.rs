use log::LevelFilter;

use std::{path::PathBuf, sync::Once};

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        env_logger::builder()
            .is_test(true)
            .filter_level(LevelFilter::Debug)
            .init();
    });
}

/// PVTGeodetic_v2 extract: GPS+Galileo and GPS L1/L2+Galileo solutions,
/// one DOP rejection and one suppressed epoch.
pub const GEODETIC_STF: &str = "\
TOW[s],WNc[week],Mode,Error,Latitude[rad],Longitude[rad],Height[m],NrSV,SignalInfo,2D/3D
TOW [s],Week number,PVT mode,PVT error,Latitude,Longitude,Ellipsoidal height,Nr of SV,Signals used,2D or 3D
345600.0,2100,1,0,0.8934874511710084,0.07252331734226998,45.2,12,65537,0
345601.0,2100,1,0,0.8934874511710084,0.07252331734226998,45.3,12,65537,0
345602.0,2100,1,0,0.8934874511710084,0.07252331734226998,45.1,11,65537,1
345603.0,2100,1,0,0.8934881493027091,0.07252541173737237,46.0,14,131081,0
345604.0,2100,1,0,0.8934881493027091,0.07252541173737237,46.2,14,131081,0
345605.0,2100,0,3,,,,4,0,0
345606.0,2100,0,127,,,,0,0,0
345607.0,2100,1,0,0.8934881493027091,0.07252541173737237,46.5,12,65537,0
";

/// ReceiverStatus_2 extract: 3 front-ends, one row without AGC.
pub const RXSTATUS_STF: &str = "\
TOW[s],WNc[week],CPULoad[%],UpTime[s],RxStatus,RxError,FrontEnd,AGCGain[dB],SampleVar,Blanking[%]
TOW [s],Week number,CPU load,Up time,Receiver status,Receiver error,Front-end,AGC gain,Sample variance,Blanking
345600.0,2100,45,3600,2,0,0,28.0,100,0
345600.0,2100,45,3600,2,0,3,31.0,100,0
345601.0,2100,46,3601,2,0,0,27.0,100,0
345601.0,2100,46,3601,2,0,3,33.0,100,0
345602.0,2100,44,3602,2,0,0,29.0,100,0
345602.0,2100,44,3602,2,0,3,,100,0
345603.0,2100,45,3603,2,0,0,26.0,100,0
345603.0,2100,45,3603,2,0,5,40.0,100,0
";

/// Unique temporary file path, for tests that go through the file system.
pub fn temp_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("stf2report-{}-{}", std::process::id(), name));
    path
}
