//! An in-process imitation of the Foody application.
//!
//! `FakeFoody` implements `WebDriver` and renders, per page, exactly the
//! elements the real markup exposes under the selectors in
//! `foody_e2e::selectors`. By default it behaves correctly; `Faults` switch
//! on individual defects, and `Faults::deployed()` reproduces the deployed
//! application, where submitting the edit form appends a new item.

#![allow(dead_code, clippy::unwrap_used)]

use foody_e2e::selectors as sel;
use foody_e2e::{FoodyError, FoodyResult, Locator, Query, WebDriver};
use std::cell::RefCell;
use std::collections::HashMap;

pub const BASE: &str = "http://foody.test:85/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FoodName,
    FoodDescription,
    FoodUrl,
    LoginUsername,
    LoginPassword,
    RegUsername,
    RegEmail,
    RegFirstName,
    RegMiddleName,
    RegLastName,
    RegPassword,
    RegRePassword,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    NavAddFood,
    NavLogIn,
    NavSignUp,
    LogoutLink,
    LoginLink,
    RegisterLink,
    AddFoodLink,
    Input(Field),
    Submit,
    ValidationSummary,
    NameValidation,
    DescriptionValidation,
    Card(usize),
    CardTitle(usize),
    CardEdit(usize),
    CardDelete(usize),
    SearchButton,
    EmptyMessage,
    EmptyAddFood,
    SignUpButton,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeHandle {
    key: Key,
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Screen {
    Home { search: Option<String> },
    AddFood { errors: bool },
    EditFood { id: u32 },
    Login,
    Register,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Food {
    pub id: u32,
    pub name: String,
    pub description: String,
}

/// Knobs that break one part of the application
#[derive(Debug, Clone, Default)]
pub struct Faults {
    /// Registration form is not rendered
    pub no_sign_up: bool,
    /// Validation summary shows different wording
    pub reworded_validation: bool,
    /// Delete links do nothing
    pub delete_is_noop: bool,
    /// Submitting the edit form adds a new item instead of renaming
    pub edit_appends: bool,
}

impl Faults {
    /// The behaviour of the deployed application
    pub fn deployed() -> Self {
        Self {
            edit_appends: true,
            ..Self::default()
        }
    }
}

#[derive(Debug)]
struct State {
    url: String,
    generation: u64,
    screen: Screen,
    inputs: HashMap<Field, String>,
    foods: Vec<Food>,
    next_id: u32,
    users: HashMap<String, String>,
    logged_in: Option<String>,
    faults: Faults,
}

#[derive(Debug)]
pub struct FakeFoody {
    state: RefCell<State>,
}

fn css(s: &str) -> Query {
    Locator::css(s).to_query()
}

fn xpath(s: &str) -> Query {
    Locator::xpath(s).to_query()
}

impl FakeFoody {
    pub fn new() -> Self {
        Self::with_faults(Faults::default())
    }

    pub fn with_faults(faults: Faults) -> Self {
        Self {
            state: RefCell::new(State {
                url: "about:blank".to_string(),
                generation: 0,
                screen: Screen::Home { search: None },
                inputs: HashMap::new(),
                foods: Vec::new(),
                next_id: 1,
                users: HashMap::new(),
                logged_in: None,
                faults,
            }),
        }
    }

    /// Add an item owned by someone else
    pub fn seed(&self, name: &str, description: &str) {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        state.foods.push(Food {
            id,
            name: name.to_string(),
            description: description.to_string(),
        });
    }

    /// Create an account and sign in without going through the form
    pub fn sign_in_as(&self, username: &str, password: &str) {
        let mut state = self.state.borrow_mut();
        state
            .users
            .insert(username.to_string(), password.to_string());
        state.logged_in = Some(username.to_string());
    }

    pub fn foods(&self) -> Vec<Food> {
        self.state.borrow().foods.clone()
    }

    pub fn users(&self) -> Vec<String> {
        self.state.borrow().users.keys().cloned().collect()
    }

    pub fn logged_in(&self) -> Option<String> {
        self.state.borrow().logged_in.clone()
    }

    fn navigate(state: &mut State, path: &str, screen: Screen) {
        state.url = format!("{BASE}{path}");
        state.screen = screen;
        state.inputs.clear();
        state.generation += 1;
    }

    fn visible_foods(state: &State) -> Vec<usize> {
        let Screen::Home { search } = &state.screen else {
            return Vec::new();
        };
        if state.logged_in.is_none() {
            return Vec::new();
        }
        let needle = search.as_deref().unwrap_or("").to_lowercase();
        state
            .foods
            .iter()
            .enumerate()
            .filter(|(_, f)| f.name.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect()
    }

    /// Elements on the current screen with the query each answers to
    fn rendered(state: &State) -> Vec<(Query, Key)> {
        let mut out = Vec::new();
        if state.logged_in.is_some() {
            out.push((xpath(sel::NAV_ADD_FOOD), Key::NavAddFood));
            out.push((xpath(sel::ADD_FOOD_LINK), Key::AddFoodLink));
            out.push((xpath(sel::LOGOUT_LINK), Key::LogoutLink));
        } else {
            out.push((xpath(sel::NAV_LOG_IN), Key::NavLogIn));
            out.push((xpath(sel::LOGIN_LINK), Key::LoginLink));
            if !state.faults.no_sign_up {
                out.push((xpath(sel::NAV_SIGN_UP), Key::NavSignUp));
                out.push((xpath(sel::REGISTER_LINK), Key::RegisterLink));
            }
        }

        match &state.screen {
            Screen::Home { .. } => {
                if state.logged_in.is_some() {
                    out.push((xpath(sel::SEARCH_INPUT), Key::Input(Field::Search)));
                    out.push((css(sel::SEARCH_BUTTON), Key::SearchButton));
                    let cards = Self::visible_foods(state);
                    if cards.is_empty() {
                        out.push((xpath(sel::EMPTY_MESSAGE), Key::EmptyMessage));
                        out.push((xpath(sel::EMPTY_ADD_FOOD_BUTTON), Key::EmptyAddFood));
                    }
                    for i in cards {
                        out.push((css(sel::CARD), Key::Card(i)));
                        out.push((css(sel::CARD_TITLE), Key::CardTitle(i)));
                    }
                }
            }
            Screen::AddFood { .. } | Screen::EditFood { .. } if state.logged_in.is_some() => {
                out.push((css(sel::FOOD_NAME_INPUT), Key::Input(Field::FoodName)));
                out.push((
                    css(sel::FOOD_DESCRIPTION_INPUT),
                    Key::Input(Field::FoodDescription),
                ));
                out.push((css(sel::FOOD_URL_INPUT), Key::Input(Field::FoodUrl)));
                out.push((css(sel::SUBMIT_BUTTON), Key::Submit));
                if matches!(state.screen, Screen::AddFood { errors: true }) {
                    out.push((css(sel::VALIDATION_SUMMARY), Key::ValidationSummary));
                    out.push((css(sel::NAME_VALIDATION), Key::NameValidation));
                    out.push((
                        css(sel::DESCRIPTION_VALIDATION),
                        Key::DescriptionValidation,
                    ));
                }
            }
            Screen::Login => {
                out.push((
                    css(sel::LOGIN_USERNAME_INPUT),
                    Key::Input(Field::LoginUsername),
                ));
                out.push((
                    css(sel::LOGIN_PASSWORD_INPUT),
                    Key::Input(Field::LoginPassword),
                ));
                out.push((css(sel::SUBMIT_BUTTON), Key::Submit));
            }
            Screen::Register => {
                for (selector, field) in [
                    (sel::REGISTER_USERNAME_INPUT, Field::RegUsername),
                    (sel::REGISTER_EMAIL_INPUT, Field::RegEmail),
                    (sel::REGISTER_FIRST_NAME_INPUT, Field::RegFirstName),
                    (sel::REGISTER_MIDDLE_NAME_INPUT, Field::RegMiddleName),
                    (sel::REGISTER_LAST_NAME_INPUT, Field::RegLastName),
                    (sel::REGISTER_PASSWORD_INPUT, Field::RegPassword),
                    (sel::REGISTER_REPASSWORD_INPUT, Field::RegRePassword),
                ] {
                    out.push((xpath(selector), Key::Input(field)));
                }
                out.push((xpath(sel::SIGN_UP_BUTTON), Key::SignUpButton));
            }
            _ => {}
        }
        out
    }

    fn checked(&self, handle: &FakeHandle) -> FoodyResult<()> {
        let state = self.state.borrow();
        let present = Self::rendered(&state).iter().any(|(_, k)| *k == handle.key)
            || matches!(handle.key, Key::CardEdit(_) | Key::CardDelete(_));
        if handle.generation != state.generation || !present {
            return Err(FoodyError::StaleElement {
                locator: format!("{:?}", handle.key),
            });
        }
        Ok(())
    }

    fn input(&self, state: &State, field: Field) -> String {
        state.inputs.get(&field).cloned().unwrap_or_default()
    }

    fn activate(&self, key: Key) {
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        match key {
            Key::NavAddFood | Key::AddFoodLink | Key::EmptyAddFood => {
                Self::navigate(state, sel::paths::FOOD_ADD, Screen::AddFood { errors: false });
            }
            Key::NavLogIn | Key::LoginLink => {
                Self::navigate(state, sel::paths::USER_LOGIN, Screen::Login);
            }
            Key::NavSignUp | Key::RegisterLink => {
                Self::navigate(state, sel::paths::USER_REGISTER, Screen::Register);
            }
            Key::LogoutLink => {
                state.logged_in = None;
                Self::navigate(state, "", Screen::Home { search: None });
            }
            Key::SearchButton => {
                let search = self.input(state, Field::Search);
                Self::navigate(state, "", Screen::Home { search: Some(search) });
            }
            Key::CardEdit(i) => {
                let id = state.foods[i].id;
                Self::navigate(
                    state,
                    &format!("{}/{id}", sel::paths::FOOD_EDIT),
                    Screen::EditFood { id },
                );
            }
            Key::CardDelete(i) => {
                if !state.faults.delete_is_noop {
                    state.foods.remove(i);
                }
                Self::navigate(state, "", Screen::Home { search: None });
            }
            Key::Submit => self.submit(state),
            Key::SignUpButton => {
                let username = self.input(state, Field::RegUsername);
                let password = self.input(state, Field::RegPassword);
                if !username.is_empty() && password == self.input(state, Field::RegRePassword) {
                    state.users.insert(username.clone(), password);
                    state.logged_in = Some(username);
                    Self::navigate(state, "", Screen::Home { search: None });
                }
            }
            _ => {}
        }
    }

    fn submit(&self, state: &mut State) {
        match state.screen.clone() {
            Screen::AddFood { .. } => {
                let name = self.input(state, Field::FoodName);
                let description = self.input(state, Field::FoodDescription);
                if name.trim().is_empty() || description.trim().is_empty() {
                    Self::navigate(state, sel::paths::FOOD_ADD, Screen::AddFood { errors: true });
                } else {
                    let id = state.next_id;
                    state.next_id += 1;
                    state.foods.push(Food {
                        id,
                        name,
                        description,
                    });
                    Self::navigate(state, "", Screen::Home { search: None });
                }
            }
            Screen::EditFood { id } => {
                let name = self.input(state, Field::FoodName);
                let description = self.input(state, Field::FoodDescription);
                if state.faults.edit_appends {
                    let id = state.next_id;
                    state.next_id += 1;
                    state.foods.push(Food {
                        id,
                        name,
                        description,
                    });
                } else if let Some(food) = state.foods.iter_mut().find(|f| f.id == id) {
                    food.name = name;
                    food.description = description;
                }
                Self::navigate(state, "", Screen::Home { search: None });
            }
            Screen::Login => {
                let username = self.input(state, Field::LoginUsername);
                let password = self.input(state, Field::LoginPassword);
                if state.users.get(&username) == Some(&password) {
                    state.logged_in = Some(username);
                    Self::navigate(state, "", Screen::Home { search: None });
                } else {
                    Self::navigate(state, sel::paths::USER_LOGIN, Screen::Login);
                }
            }
            _ => {}
        }
    }
}

impl WebDriver for FakeFoody {
    type Element = FakeHandle;

    fn goto(&self, url: &str) -> FoodyResult<()> {
        let mut state = self.state.borrow_mut();
        let path = url.strip_prefix(BASE).ok_or_else(|| FoodyError::Navigation {
            url: url.to_string(),
            message: "unknown host".to_string(),
        })?;
        let screen = match path {
            p if p == sel::paths::FOOD_ADD => Screen::AddFood { errors: false },
            p if p == sel::paths::USER_LOGIN => Screen::Login,
            p if p == sel::paths::USER_REGISTER => Screen::Register,
            _ => Screen::Home { search: None },
        };
        Self::navigate(&mut state, path, screen);
        Ok(())
    }

    fn current_url(&self) -> FoodyResult<String> {
        Ok(self.state.borrow().url.clone())
    }

    fn find_elements(&self, query: &Query) -> FoodyResult<Vec<FakeHandle>> {
        let state = self.state.borrow();
        Ok(Self::rendered(&state)
            .into_iter()
            .filter(|(q, _)| q == query)
            .map(|(_, key)| FakeHandle {
                key,
                generation: state.generation,
            })
            .collect())
    }

    fn find_elements_in(&self, parent: &FakeHandle, query: &Query) -> FoodyResult<Vec<FakeHandle>> {
        self.checked(parent)?;
        let Key::Card(i) = parent.key else {
            return Ok(Vec::new());
        };
        let key = if *query == css(sel::CARD_TITLE) {
            Key::CardTitle(i)
        } else if *query == css(sel::CARD_EDIT_LINK) {
            Key::CardEdit(i)
        } else if *query == css(sel::CARD_DELETE_LINK) {
            Key::CardDelete(i)
        } else {
            return Ok(Vec::new());
        };
        Ok(vec![FakeHandle {
            key,
            generation: parent.generation,
        }])
    }

    fn is_displayed(&self, element: &FakeHandle) -> FoodyResult<bool> {
        self.checked(element)?;
        Ok(true)
    }

    fn text(&self, element: &FakeHandle) -> FoodyResult<String> {
        self.checked(element)?;
        let state = self.state.borrow();
        Ok(match element.key {
            Key::CardTitle(i) => state.foods[i].name.clone(),
            Key::ValidationSummary if state.faults.reworded_validation => {
                "Could not add the food.".to_string()
            }
            Key::ValidationSummary => "Unable to add this food revue!".to_string(),
            Key::NameValidation => "The Name field is required.".to_string(),
            Key::DescriptionValidation => "The Description field is required.".to_string(),
            Key::EmptyMessage => "There are no foods :(".to_string(),
            Key::EmptyAddFood => "Add food".to_string(),
            Key::Input(field) => self.input(&state, field),
            _ => String::new(),
        })
    }

    fn click(&self, element: &FakeHandle) -> FoodyResult<()> {
        self.checked(element)?;
        self.activate(element.key);
        Ok(())
    }

    fn move_to_and_click(&self, element: &FakeHandle) -> FoodyResult<()> {
        self.click(element)
    }

    fn clear(&self, element: &FakeHandle) -> FoodyResult<()> {
        self.checked(element)?;
        if let Key::Input(field) = element.key {
            self.state.borrow_mut().inputs.remove(&field);
        }
        Ok(())
    }

    fn send_keys(&self, element: &FakeHandle, text: &str) -> FoodyResult<()> {
        self.checked(element)?;
        if let Key::Input(field) = element.key {
            self.state
                .borrow_mut()
                .inputs
                .entry(field)
                .or_default()
                .push_str(text);
        }
        Ok(())
    }
}
