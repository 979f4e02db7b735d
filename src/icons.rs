// ASCII icons that render in any terminal

use crate::nav::ScreenId;

pub struct Icons;

impl Icons {
    // Screens
    pub const WALLET: &'static str = "[W]";
    pub const DEPOSIT: &'static str = "[+]";
    pub const WITHDRAW: &'static str = "[-]";
    pub const RECHARGE: &'static str = "[#]";
    pub const TRANSFER: &'static str = "[→]";
    pub const HISTORY: &'static str = "[H]";
    pub const PROFILE: &'static str = "[@]";
    pub const SETTINGS: &'static str = "[*]";

    // Status
    pub const LOCKED: &'static str = "[X]";
    pub const VERIFIED: &'static str = "[✓]";
    pub const LOADING: &'static str = "[~]";
    pub const COPIED: &'static str = "[C]";

    // UI
    pub const MENU: &'static str = "[≡]";
    pub const ARROW_RIGHT: &'static str = ">";
    pub const INFO: &'static str = "[i]";
    pub const PHONE: &'static str = "[T]";
    pub const LINK: &'static str = "[L]";

    pub const fn for_screen(screen: ScreenId) -> &'static str {
        match screen {
            ScreenId::Deposit => Self::DEPOSIT,
            ScreenId::Withdraw => Self::WITHDRAW,
            ScreenId::Recharge => Self::RECHARGE,
            ScreenId::Transfer => Self::TRANSFER,
            ScreenId::History => Self::HISTORY,
            ScreenId::Profile => Self::PROFILE,
            ScreenId::Settings => Self::SETTINGS,
            ScreenId::PermissionDenied => Self::LOCKED,
            ScreenId::Splash | ScreenId::Landing | ScreenId::Login | ScreenId::Dashboard => Self::WALLET,
        }
    }
}
