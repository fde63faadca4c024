//! Page object for the Foody application.
//!
//! Every helper is a straight-line sequence of lookups through the
//! [`Finder`] followed by clear/type/click. There is no local validation and
//! no retry: if an expected element never shows up the lookup times out and
//! the calling step fails.

use crate::config::Registration;
use crate::driver::WebDriver;
use crate::finder::Finder;
use crate::fixture::{generate_random_string, FixtureState};
use crate::locator::Locator;
use crate::result::{FoodyError, FoodyResult};
use crate::selectors as sel;
use tracing::{debug, info};

/// Per-card action links
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    /// The card's Edit link
    Edit,
    /// The card's Delete link
    Delete,
}

impl CardAction {
    const fn selector(self) -> &'static str {
        match self {
            Self::Edit => sel::CARD_EDIT_LINK,
            Self::Delete => sel::CARD_DELETE_LINK,
        }
    }
}

/// Foody page helpers bound to one session
pub struct FoodyPage<'d, D: WebDriver> {
    find: Finder<'d, D>,
    base_url: String,
}

impl<D: WebDriver> std::fmt::Debug for FoodyPage<'_, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FoodyPage")
            .field("base_url", &self.base_url)
            .field("find", &self.find)
            .finish()
    }
}

impl<'d, D: WebDriver> FoodyPage<'d, D> {
    /// Bind the page helpers to a finder and a base URL.
    ///
    /// The base URL is normalised to end with `/`.
    #[must_use]
    pub fn new(find: Finder<'d, D>, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { find, base_url }
    }

    /// The finder used for every lookup
    #[must_use]
    pub const fn finder(&self) -> Finder<'d, D> {
        self.find
    }

    /// Base URL, always ending with `/`
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path relative to the base URL
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Navigate to the home page
    pub fn go_home(&self) -> FoodyResult<()> {
        self.go_to("")
    }

    /// Navigate to a path relative to the base URL
    pub fn go_to(&self, path: &str) -> FoodyResult<()> {
        let url = self.url_for(path);
        debug!(%url, "navigate");
        self.find.driver().goto(&url)
    }

    /// URL of the current document
    pub fn current_url(&self) -> FoodyResult<String> {
        self.find.driver().current_url()
    }

    /// Text of the first visible element matching `locator`
    pub fn text_of(&self, locator: &Locator) -> FoodyResult<String> {
        let element = self.find.find_one(locator)?;
        self.find.driver().text(&element)
    }

    /// Whether the first match for `locator` shows up and is displayed
    pub fn is_displayed(&self, locator: &Locator) -> FoodyResult<bool> {
        let element = self.find.find_one(locator)?;
        self.find.driver().is_displayed(&element)
    }

    fn fill(&self, element: &D::Element, text: &str) -> FoodyResult<()> {
        let driver = self.find.driver();
        driver.clear(element)?;
        driver.send_keys(element, text)
    }

    fn fill_css(&self, selector: &str, text: &str) -> FoodyResult<()> {
        self.fill(&self.find.css(selector)?, text)
    }

    fn fill_xpath(&self, selector: &str, text: &str) -> FoodyResult<()> {
        self.fill(&self.find.xpath(selector)?, text)
    }

    fn click_xpath(&self, selector: &str) -> FoodyResult<()> {
        let element = self.find.xpath(selector)?;
        self.find.driver().click(&element)
    }

    /// Open the add form, fill name and description, submit.
    ///
    /// Succeeds once submit is clicked, whatever the application decides.
    pub fn create_item(&self, name: &str, description: &str) -> FoodyResult<()> {
        info!(name, description, "create item");
        self.click_xpath(sel::NAV_ADD_FOOD)?;
        self.submit_food_form(name, description)
    }

    /// Fill and submit the food form already on screen (add or edit page)
    pub fn submit_food_form(&self, name: &str, description: &str) -> FoodyResult<()> {
        debug!(name, description, "submit food form");
        self.fill_css(sel::FOOD_NAME_INPUT, name)?;
        self.fill_css(sel::FOOD_DESCRIPTION_INPUT, description)?;
        self.fill_css(sel::FOOD_URL_INPUT, sel::DEFAULT_FOOD_PICTURE)?;

        let submit = self.find.css(sel::SUBMIT_BUTTON)?;
        self.find.driver().click(&submit)
    }

    /// Last card in document order.
    ///
    /// # Errors
    ///
    /// [`FoodyError::EmptyResultPrecondition`] when the page renders no card.
    pub fn last_card(&self) -> FoodyResult<D::Element> {
        self.find
            .all_css(sel::CARD)?
            .pop()
            .ok_or_else(|| FoodyError::EmptyResultPrecondition {
                what: "food card".to_string(),
            })
    }

    /// Title text of a card
    pub fn card_title(&self, card: &D::Element) -> FoodyResult<String> {
        let title = self.find.find_one_in(card, &Locator::css(sel::CARD_TITLE))?;
        self.find.driver().text(&title)
    }

    /// Titles of every card on the page, in document order
    pub fn card_titles(&self) -> FoodyResult<Vec<String>> {
        self.find
            .all_css(sel::CARD)?
            .iter()
            .map(|card| self.card_title(card))
            .collect()
    }

    /// Move to and click the Edit or Delete link of the last card
    pub fn open_last_card_action(&self, action: CardAction) -> FoodyResult<()> {
        info!(?action, "open last card action");
        let card = self.last_card()?;
        let link = self
            .find
            .find_one_in(&card, &Locator::css(action.selector()))?;
        self.find.driver().move_to_and_click(&link)
    }

    /// Type into the search box and press the search button
    pub fn search(&self, criteria: &str) -> FoodyResult<()> {
        info!(criteria, "search");
        self.fill_xpath(sel::SEARCH_INPUT, criteria)?;
        let button = self.find.css(sel::SEARCH_BUTTON)?;
        self.find.driver().click(&button)
    }

    /// Count the cards currently in the DOM and record the count.
    ///
    /// This is a single immediate query, not a wait.
    pub fn count_displayed_elements(&self, fixture: &mut FixtureState) -> FoodyResult<usize> {
        let count = self
            .find
            .driver()
            .find_elements(&Locator::css(sel::CARD).to_query())?
            .len();
        fixture.set_displayed_card_count(count);
        info!(count, "displayed cards");
        Ok(count)
    }

    /// Log in through the navigation bar
    pub fn login(&self, username: &str, password: &str) -> FoodyResult<()> {
        info!(username, "login");
        self.click_xpath(sel::NAV_LOG_IN)?;
        self.fill_css(sel::LOGIN_USERNAME_INPUT, username)?;
        self.fill_css(sel::LOGIN_PASSWORD_INPUT, password)?;
        let submit = self.find.css(sel::SUBMIT_BUTTON)?;
        self.find.driver().click(&submit)
    }

    /// Register a freshly generated user and record its username
    pub fn register(
        &self,
        fixture: &mut FixtureState,
        details: &Registration,
    ) -> FoodyResult<String> {
        let username = format!(
            "{}{}",
            details.username_prefix,
            generate_random_string(details.username_suffix_len)
        );
        fixture.set_username(username.clone());

        self.click_xpath(sel::NAV_SIGN_UP)?;
        self.fill_xpath(sel::REGISTER_USERNAME_INPUT, &username)?;
        self.fill_xpath(
            sel::REGISTER_EMAIL_INPUT,
            &format!("{username}@{}", details.email_domain),
        )?;
        self.fill_xpath(sel::REGISTER_FIRST_NAME_INPUT, &details.first_name)?;
        self.fill_xpath(sel::REGISTER_MIDDLE_NAME_INPUT, &details.middle_name)?;
        self.fill_xpath(sel::REGISTER_LAST_NAME_INPUT, &details.last_name)?;
        self.fill_xpath(sel::REGISTER_PASSWORD_INPUT, &details.password)?;
        self.fill_xpath(sel::REGISTER_REPASSWORD_INPUT, &details.password)?;

        let sign_up = self.find.xpath(sel::SIGN_UP_BUTTON)?;
        self.find.driver().move_to_and_click(&sign_up)?;

        info!(%username, "registered user");
        Ok(username)
    }

    /// Click the logout link
    pub fn logout(&self) -> FoodyResult<()> {
        info!("logout");
        self.click_xpath(sel::LOGOUT_LINK)
    }
}
