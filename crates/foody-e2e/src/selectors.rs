//! Paths and selectors of the Foody application's current markup.
//!
//! These are a contract with the target application: a markup change shows
//! up as a lookup timeout.

/// Relative paths
pub mod paths {
    pub const FOOD_ADD: &str = "Food/Add";
    pub const FOOD_EDIT: &str = "Food/Edit";
    pub const FOOD_DELETE: &str = "Food/Delete";
    pub const USER_LOGIN: &str = "User/Login";
    pub const USER_LOGOUT: &str = "User/Logout";
    pub const USER_REGISTER: &str = "User/Register";
}

// Navigation bar
pub const NAV_ADD_FOOD: &str = "//a[@class='nav-link'][contains(.,'Add Food')]";
pub const NAV_LOG_IN: &str = "//a[@class='nav-link'][contains(.,'Log In')]";
pub const NAV_SIGN_UP: &str = "//a[@class='nav-link'][contains(.,'Sign Up')]";
pub const LOGOUT_LINK: &str = "//a[@href='/User/Logout']";
pub const LOGIN_LINK: &str = "//a[@href='/User/Login']";
pub const REGISTER_LINK: &str = "//a[@href='/User/Register']";
pub const ADD_FOOD_LINK: &str = "//a[@href='/Food/Add']";

// Food form
pub const FOOD_NAME_INPUT: &str = "input#name";
pub const FOOD_DESCRIPTION_INPUT: &str = "input#description";
pub const FOOD_URL_INPUT: &str = "input#url";
pub const SUBMIT_BUTTON: &str = "[type='submit']";
pub const VALIDATION_SUMMARY: &str = ".text-danger.validation-summary-errors > ul > li";
pub const NAME_VALIDATION: &str = "[data-valmsg-for='Name']";
pub const DESCRIPTION_VALIDATION: &str = "[data-valmsg-for='Description']";

/// Picture attached to every created item
pub const DEFAULT_FOOD_PICTURE: &str =
    "https://cdn.britannica.com/71/182071-050-4081A3AB/Poutine.jpg";

// Listing
pub const CARD: &str = ".row.gx-5.align-items-center";
pub const CARD_TITLE: &str = "div.p-5 > h2";
pub const CARD_EDIT_LINK: &str = "a[href*='/Food/Edit']";
pub const CARD_DELETE_LINK: &str = "a[href*='/Food/Delete']";
pub const SEARCH_INPUT: &str = "//input[contains(@type,'search')]";
pub const SEARCH_BUTTON: &str = ".btn.btn-primary.col-2.mt-5.rounded-pill > svg[role='img']";
pub const EMPTY_MESSAGE: &str = "//h2[@class='display-4']";
pub const EMPTY_ADD_FOOD_BUTTON: &str =
    "//a[@class='btn btn-primary btn-xl rounded-pill mt-5'][contains(.,'Add food')]";

// Login form
pub const LOGIN_USERNAME_INPUT: &str = "input#username";
pub const LOGIN_PASSWORD_INPUT: &str = "input#password";

// Registration form
pub const REGISTER_USERNAME_INPUT: &str = "//input[contains(@id,'username')]";
pub const REGISTER_EMAIL_INPUT: &str = "//input[contains(@type,'email')]";
pub const REGISTER_FIRST_NAME_INPUT: &str = "//input[contains(@id,'firstName')]";
pub const REGISTER_MIDDLE_NAME_INPUT: &str = "//input[contains(@id,'midName')]";
pub const REGISTER_LAST_NAME_INPUT: &str = "//input[contains(@id,'lastName')]";
pub const REGISTER_PASSWORD_INPUT: &str = "//input[contains(@id,'password')]";
pub const REGISTER_REPASSWORD_INPUT: &str = "//input[contains(@id,'rePassword')]";
pub const SIGN_UP_BUTTON: &str = "//button[contains(.,'Sign up')]";
